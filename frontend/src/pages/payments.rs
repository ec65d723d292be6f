use std::rc::Rc;

use gembank_core::clock::SystemClock;
use gembank_core::documents::{DocumentRenderer, Invoice, INVOICE_TEMPLATE_ID};
use gembank_core::i18n::keys;
use gembank_core::lifetime::ViewLifetime;
use gembank_core::payments::{
    process_payment, BillingDetails, BillingField, CheckoutError, CheckoutFlow, PaymentStatus,
    SimulatedProcessor,
};
use gembank_core::validation::FieldErrors;
use gembank_core::{PaymentError, Timings};
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::config;
use crate::context::i18n::{use_i18n, I18n};
use crate::context::notices::{use_notices, Notices};
use crate::services::pdf::CanvasPdfRenderer;
use crate::services::storage::local_store;
use crate::services::stripe::StripeCard;
use crate::services::timers::BrowserSleeper;

const CARD_SELECTOR: &str = "#card-element";

#[derive(Properties, PartialEq)]
struct InvoiceModalProps {
    invoice: Invoice,
    on_close: Callback<()>,
}

#[function_component]
fn InvoiceModal(props: &InvoiceModalProps) -> Html {
    let i18n = use_i18n();
    let notices = use_notices();
    let downloading = use_state(|| false);
    let lifetime = use_memo(|_| ViewLifetime::new(), ());
    let invoice = &props.invoice;

    let on_download = {
        let request = invoice.render_request();
        let downloading = downloading.clone();
        let token = lifetime.token();
        let i18n = i18n.clone();
        Callback::from(move |_: MouseEvent| {
            if *downloading {
                return;
            }
            downloading.set(true);
            let request = request.clone();
            let downloading = downloading.clone();
            let token = token.clone();
            let notices = notices.clone();
            let i18n = i18n.clone();
            spawn_local(async move {
                let result = CanvasPdfRenderer.render(&request).await;
                match &result {
                    Ok(()) => notices.success(
                        i18n.t(keys::toasts::SUCCESS_TITLE),
                        i18n.t(keys::payments::INVOICE_GENERATED_SUCCESS),
                    ),
                    Err(e) => {
                        log::error!("invoice export failed: {}", e);
                        notices.error(
                            i18n.t(keys::toasts::ERROR_TITLE),
                            i18n.t(keys::payments::INVOICE_GENERATED_ERROR),
                        );
                    }
                }
                token.run(|| downloading.set(false));
            });
        })
    };

    let close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    html! {
        <div class="modal-backdrop">
            <div class="modal invoice-modal" role="dialog">
                <div id={INVOICE_TEMPLATE_ID} class="invoice">
                    <div class="invoice-header">
                        <h2>{"GEMBank"}</h2>
                        <h3>{i18n.t(keys::payments::INVOICE_TITLE)}</h3>
                    </div>
                    <dl class="invoice-meta">
                        <dt>{i18n.t(keys::payments::INVOICE_ID)}</dt>
                        <dd>{&invoice.id}</dd>
                        <dt>{i18n.t(keys::payments::DATE)}</dt>
                        <dd>{invoice.display_date()}</dd>
                        <dt>{i18n.t(keys::payments::BILLED_TO)}</dt>
                        <dd>{&invoice.customer_name}<br />{&invoice.customer_email}</dd>
                    </dl>
                    <table class="invoice-lines">
                        <thead>
                            <tr>
                                <th>{i18n.t(keys::payments::ITEM)}</th>
                                <th>{i18n.t(keys::payments::AMOUNT)}</th>
                            </tr>
                        </thead>
                        <tbody>
                            <tr>
                                <td>{i18n.t(keys::payments::ITEM_DESCRIPTION)}</td>
                                <td>{invoice.formatted_amount()}</td>
                            </tr>
                        </tbody>
                        <tfoot>
                            <tr>
                                <th>{i18n.t(keys::payments::TOTAL)}</th>
                                <th>{format!("{} {}", invoice.formatted_amount(), invoice.currency)}</th>
                            </tr>
                        </tfoot>
                    </table>
                    <p class="invoice-method">
                        {i18n.t(keys::payments::PAYMENT_METHOD)}{": "}{&invoice.payment_method_id}
                    </p>
                </div>
                <div class="modal-actions">
                    <button type="button" class="secondary-button" onclick={close}>
                        {i18n.t(keys::payments::CLOSE)}
                    </button>
                    <button type="button" class="primary-button" onclick={on_download} disabled={*downloading}>
                        if *downloading {
                            <span class="loading-spinner"></span>
                        }
                        {i18n.t(keys::payments::DOWNLOAD_INVOICE)}
                    </button>
                </div>
            </div>
        </div>
    }
}

fn announce(notices: &Notices, i18n: &I18n, flow: &CheckoutFlow) {
    match flow.status() {
        PaymentStatus::Succeeded => {
            if let Some(id) = flow.payment_method_id() {
                notices.success(
                    i18n.t(keys::payments::PAYMENT_SUCCESS_TITLE),
                    i18n.t_with(keys::payments::PAYMENT_SUCCESS_MESSAGE, &[("paymentMethodId", id)]),
                );
            }
        }
        PaymentStatus::Failed => notices.error(
            i18n.t(keys::payments::PAYMENT_FAILED_TITLE),
            flow.error()
                .map(|e| e.message.clone())
                .unwrap_or_else(|| i18n.t(keys::payments::PAYMENT_ERROR)),
        ),
        PaymentStatus::Idle | PaymentStatus::Processing => {}
    }
}

#[function_component]
pub fn Payments() -> Html {
    let i18n = use_i18n();
    let notices = use_notices();
    let flow = use_state(CheckoutFlow::new);
    let billing = use_state(BillingDetails::default);
    let errors = use_state(FieldErrors::<BillingField>::new);
    let card = use_state(|| None::<Rc<StripeCard>>);
    let card_error = use_state(|| None::<String>);
    let lifetime = use_memo(|_| ViewLifetime::new(), ());
    let amount = Timings::default().payment_amount;

    {
        let card = card.clone();
        let card_error = card_error.clone();
        use_effect_with_deps(
            move |_| {
                match StripeCard::mount(config::stripe_publishable_key(), CARD_SELECTOR) {
                    Ok(mounted) => card.set(Some(Rc::new(mounted))),
                    Err(e) => {
                        log::error!("card element unavailable: {}", e);
                        card_error.set(Some(e.message));
                    }
                }
                || ()
            },
            (),
        );
    }

    let on_name = {
        let billing = billing.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut next = (*billing).clone();
            next.name = input.value();
            billing.set(next);
        })
    };
    let on_email = {
        let billing = billing.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut next = (*billing).clone();
            next.email = input.value();
            billing.set(next);
        })
    };

    let onsubmit = {
        let flow = flow.clone();
        let billing = billing.clone();
        let errors = errors.clone();
        let card = card.clone();
        let token = lifetime.token();
        let notices = notices.clone();
        let i18n = i18n.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let mut next = (*flow).clone();
            match next.begin(&billing) {
                Ok(()) => errors.set(FieldErrors::new()),
                Err(CheckoutError::Busy) => return,
                Err(CheckoutError::Invalid(found)) => {
                    errors.set(found);
                    return;
                }
            }
            flow.set(next.clone());

            let details = (*billing).clone();
            let card = (*card).clone();
            let flow = flow.clone();
            let token = token.clone();
            let notices = notices.clone();
            let i18n = i18n.clone();
            spawn_local(async move {
                let processor = SimulatedProcessor::new(
                    Rc::new(BrowserSleeper),
                    Rc::new(SystemClock),
                    Timings::default().payment_confirmation,
                );
                let result = match card {
                    Some(card) => process_payment(&*card, &processor, &details, amount).await,
                    None => Err(PaymentError::new(i18n.t(keys::payments::PAYMENT_ERROR))),
                };
                token.run(|| {
                    next.complete(result, local_store().as_ref());
                    announce(&notices, &i18n, &next);
                    flow.set(next);
                });
            });
        })
    };

    let change_flow = |apply: fn(&mut CheckoutFlow)| {
        let flow = flow.clone();
        Callback::from(move |_: MouseEvent| {
            let mut next = (*flow).clone();
            apply(&mut next);
            flow.set(next);
        })
    };
    let on_try_again = change_flow(CheckoutFlow::try_again);
    let on_view_invoice = change_flow(CheckoutFlow::show_invoice);
    let on_close_invoice = {
        let flow = flow.clone();
        Callback::from(move |_| {
            let mut next = (*flow).clone();
            next.close_invoice();
            flow.set(next);
        })
    };

    let processing = flow.is_processing();
    // The card element must stay mounted across retries, so the form is hidden rather than removed.
    let form_hidden = matches!(flow.status(), PaymentStatus::Succeeded | PaymentStatus::Failed);
    let invalid = |field: BillingField| errors.contains(field).then(|| "invalid");

    html! {
        <div class="page payments-page">
            <header class="page-header">
                <h1>{i18n.t(keys::payments::TITLE)}</h1>
                <p>{i18n.t(keys::payments::DESCRIPTION)}</p>
            </header>
            <div class="payment-card">
                <form class={classes!("card-form", form_hidden.then(|| "hidden"))} {onsubmit} novalidate=true>
                    <div class="form-field">
                        <label for="billing-name">{i18n.t(keys::payments::NAME)}</label>
                        <input
                            id="billing-name"
                            type="text"
                            class={classes!(invalid(BillingField::Name))}
                            value={billing.name.clone()}
                            disabled={processing}
                            oninput={on_name}
                        />
                    </div>
                    <div class="form-field">
                        <label for="billing-email">{i18n.t(keys::payments::EMAIL)}</label>
                        <input
                            id="billing-email"
                            type="email"
                            class={classes!(invalid(BillingField::Email))}
                            value={billing.email.clone()}
                            disabled={processing}
                            oninput={on_email}
                        />
                    </div>
                    <div class="form-field">
                        <label>{i18n.t(keys::payments::CARD)}</label>
                        <div id="card-element" class="card-element"></div>
                        if let Some(message) = (*card_error).clone() {
                            <span class="field-error">{message}</span>
                        }
                    </div>
                    if !errors.is_empty() {
                        <p class="form-error">{i18n.t(keys::payments::DETAILS_REQUIRED)}</p>
                    }
                    <button type="submit" class="primary-button" disabled={processing}>
                        if processing {
                            <span class="loading-spinner"></span>{i18n.t(keys::payments::PROCESSING)}
                        } else {
                            {format!("{} ₹{}.00", i18n.t(keys::payments::PAY_NOW), amount)}
                        }
                    </button>
                    <p class="powered-by">{i18n.t(keys::payments::POWERED_BY)}</p>
                </form>

                if flow.status() == PaymentStatus::Succeeded {
                    <div class="payment-result success">
                        <div class="result-icon">{"✓"}</div>
                        <h2>{i18n.t(keys::payments::PAYMENT_SUCCESS_TITLE)}</h2>
                        <p>
                            {i18n.t_with(
                                keys::payments::PAYMENT_SUCCESS_MESSAGE,
                                &[("paymentMethodId", flow.payment_method_id().unwrap_or_default())],
                            )}
                        </p>
                        <button class="primary-button" onclick={on_view_invoice}>
                            {i18n.t(keys::payments::VIEW_INVOICE)}
                        </button>
                    </div>
                }
                if flow.status() == PaymentStatus::Failed {
                    <div class="payment-result failed">
                        <div class="result-icon">{"✕"}</div>
                        <h2>{i18n.t(keys::payments::PAYMENT_FAILED_TITLE)}</h2>
                        <p>
                            {flow.error().map(|e| e.message.clone()).unwrap_or_else(|| i18n.t(keys::payments::PAYMENT_ERROR))}
                        </p>
                        <button class="primary-button" onclick={on_try_again}>
                            {i18n.t(keys::payments::TRY_AGAIN)}
                        </button>
                    </div>
                }
            </div>
            if flow.showing_invoice() {
                if let Some(invoice) = flow.invoice().cloned() {
                    <InvoiceModal {invoice} on_close={on_close_invoice} />
                }
            }
        </div>
    }
}
