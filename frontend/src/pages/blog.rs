use gembank_core::blog::{self, Block};
use gembank_core::i18n::keys;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::context::i18n::use_i18n;
use crate::Route;

#[function_component]
pub fn Blog() -> Html {
    let i18n = use_i18n();
    let language = i18n.language();

    html! {
        <div class="page">
            <header class="page-header">
                <h1>{i18n.t(keys::blog::TITLE)}</h1>
                <p>{i18n.t(keys::blog::SUBTITLE)}</p>
            </header>
            <div class="blog-list">
                { for blog::posts().iter().map(|post| html! {
                    <article class="blog-card">
                        <p class="blog-meta">
                            {post.date}{" · "}{i18n.t_with(keys::blog::BY, &[("author", post.author)])}
                        </p>
                        <h2>{post.title.get(language)}</h2>
                        <p>{post.excerpt.get(language)}</p>
                        <Link<Route> to={Route::BlogPost { slug: post.slug.to_string() }} classes="read-more">
                            {i18n.t(keys::blog::READ_MORE)}{" →"}
                        </Link<Route>>
                    </article>
                }) }
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct BlogPostProps {
    pub slug: String,
}

#[function_component]
pub fn BlogPostPage(props: &BlogPostProps) -> Html {
    let i18n = use_i18n();
    let language = i18n.language();

    let back = html! {
        <Link<Route> to={Route::Blog} classes="back-link">
            {"← "}{i18n.t(keys::blog_post::BACK)}
        </Link<Route>>
    };

    let Some(post) = blog::find(&props.slug) else {
        log::info!("no blog post '{}'", props.slug);
        return html! {
            <div class="page not-found">
                <h1>{i18n.t(keys::blog_post::NOT_FOUND)}</h1>
                {back}
            </div>
        };
    };

    html! {
        <article class="page blog-post">
            {back}
            <h1>{post.title.get(language)}</h1>
            <p class="blog-meta">
                {post.date}{" · "}{i18n.t_with(keys::blog::BY, &[("author", post.author)])}
            </p>
            { for post.blocks(language).into_iter().map(|block| match block {
                Block::Heading(text) => html! { <h2>{text}</h2> },
                Block::Paragraph(text) => html! { <p>{text}</p> },
            }) }
        </article>
    }
}
