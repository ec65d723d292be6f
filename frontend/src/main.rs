use yew::prelude::*;
use yew_router::prelude::*;
use log::info;

mod config;
mod services {
    pub mod gemini;
    pub mod locales;
    pub mod pdf;
    pub mod storage;
    pub mod stripe;
    pub mod timers;
}
mod context {
    pub mod i18n;
    pub mod notices;
}
mod components {
    pub mod chatbot;
    pub mod feedback_widget;
    pub mod footer;
    pub mod header;
    pub mod password_reset;
    pub mod toast;
}
mod pages {
    pub mod about;
    pub mod admin;
    pub mod auth;
    pub mod blog;
    pub mod contact;
    pub mod features;
    pub mod home;
    pub mod loi;
    pub mod not_found;
    pub mod payments;
    pub mod tools;
}

use components::{
    chatbot::Chatbot,
    feedback_widget::FeedbackWidget,
    footer::Footer,
    header::Header,
    toast::ToastContainer,
};
use context::{i18n::I18nProvider, notices::NoticeProvider};
use pages::{
    about::About,
    admin::Admin,
    auth::Auth,
    blog::{Blog, BlogPostPage},
    contact::Contact,
    features::Features,
    home::Home,
    loi::LoiPage,
    not_found::NotFound,
    payments::Payments,
    tools::Tools,
};

#[derive(Clone, Routable, PartialEq, Debug)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/features")]
    Features,
    #[at("/tools")]
    Tools,
    #[at("/auth")]
    Auth,
    #[at("/loi")]
    Loi,
    #[at("/contact")]
    Contact,
    #[at("/admin")]
    Admin,
    #[at("/blog")]
    Blog,
    #[at("/blog/:slug")]
    BlogPost { slug: String },
    #[at("/payments")]
    Payments,
    #[at("/about")]
    About,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(routes: Route) -> Html {
    match routes {
        Route::Home => {
            info!("Rendering Home page");
            html! { <Home /> }
        },
        Route::Features => {
            info!("Rendering Features page");
            html! { <Features /> }
        },
        Route::Tools => {
            info!("Rendering Tools page");
            html! { <Tools /> }
        },
        Route::Auth => {
            info!("Rendering Auth page");
            html! { <Auth /> }
        },
        Route::Loi => {
            info!("Rendering LOI page");
            html! { <LoiPage /> }
        },
        Route::Contact => {
            info!("Rendering Contact page");
            html! { <Contact /> }
        },
        Route::Admin => {
            info!("Rendering Admin page");
            html! { <Admin /> }
        },
        Route::Blog => {
            info!("Rendering Blog page");
            html! { <Blog /> }
        },
        Route::BlogPost { slug } => {
            info!("Rendering Blog post page for {}", slug);
            html! { <BlogPostPage {slug} /> }
        },
        Route::Payments => {
            info!("Rendering Payments page");
            html! { <Payments /> }
        },
        Route::About => {
            info!("Rendering About page");
            html! { <About /> }
        },
        Route::NotFound => {
            info!("Rendering Not Found page");
            html! { <NotFound /> }
        },
    }
}

#[function_component]
fn App() -> Html {
    html! {
        <I18nProvider>
            <NoticeProvider>
                <BrowserRouter>
                    <div class="app-shell">
                        <Header />
                        <main class="app-main">
                            <Switch<Route> render={switch} />
                        </main>
                        <Footer />
                        <Chatbot />
                        <FeedbackWidget />
                        <ToastContainer />
                    </div>
                </BrowserRouter>
            </NoticeProvider>
        </I18nProvider>
    }
}

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    if let Err(e) = console_log::init_with_level(config::log_level()) {
        gloo_console::error!(format!("error initializing log: {}", e));
    }

    info!("Starting application");
    yew::Renderer::<App>::new().render();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_page_has_its_path() {
        let cases = [
            ("/", Route::Home),
            ("/features", Route::Features),
            ("/tools", Route::Tools),
            ("/auth", Route::Auth),
            ("/loi", Route::Loi),
            ("/contact", Route::Contact),
            ("/admin", Route::Admin),
            ("/blog", Route::Blog),
            ("/payments", Route::Payments),
            ("/about", Route::About),
        ];
        for (path, route) in cases {
            assert_eq!(Route::recognize(path), Some(route.clone()), "{}", path);
            assert_eq!(route.to_path(), path);
        }
    }

    #[test]
    fn blog_posts_are_addressed_by_slug() {
        assert_eq!(
            Route::recognize("/blog/unlocking-credit-for-jewellers"),
            Some(Route::BlogPost {
                slug: "unlocking-credit-for-jewellers".to_string()
            })
        );
    }

    #[test]
    fn unknown_paths_fall_through_to_not_found() {
        assert_eq!(Route::recognize("/pricing"), Some(Route::NotFound));
        assert_eq!(Route::recognize("/blog/a/b"), Some(Route::NotFound));
    }
}
