use gloo_console::log;
use gloo_timers::callback::Timeout;
use gloo_timers::future::TimeoutFuture;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Event, FocusEvent, HtmlInputElement, HtmlSelectElement, InputEvent};
use yew::prelude::*;
use yew_router::prelude::*;

use crate::config;
use crate::lead::attribution::AttributionCapture;
use crate::lead::form::{BudgetBand, Field, FormValues, PropertyType, ValidationState};
use crate::lead::pipeline::{deliver, ClientMeta, Settled, SubmissionPipeline, SubmitBlocked};
use crate::lead::store::BrowserStore;
use crate::Route;

const NAVIGATE_DELAY_MS: u32 = 800;
const STATUS_CLEAR_MS: u32 = 3_000;

#[function_component]
pub fn Home() -> Html {
    let values = use_state(FormValues::default);
    let validation = use_state(ValidationState::default);
    let attribution = use_state(AttributionCapture::default);
    let is_submitting = use_state(|| false);
    let success = use_state(|| None::<String>);
    let error = use_state(|| None::<String>);
    let pipeline = use_mut_ref(|| SubmissionPipeline::new(config::form_config()));
    let navigator = use_navigator().unwrap();

    // Capture attribution parameters once per page load
    {
        let attribution = attribution.clone();
        use_effect_with_deps(
            move |_| {
                attribution.set(AttributionCapture::from_window(&BrowserStore));
                || ()
            },
            (),
        );
    }

    let edit_field = |apply: fn(&mut FormValues, String)| {
        let values = values.clone();
        let validation = validation.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut next = (*values).clone();
            apply(&mut next, input.value());
            let mut state = (*validation).clone();
            state.recompute(&next, &config::form_config());
            values.set(next);
            validation.set(state);
        })
    };

    let select_field = |field: Field, apply: fn(&mut FormValues, String)| {
        let values = values.clone();
        let validation = validation.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            let mut next = (*values).clone();
            apply(&mut next, select.value());
            let mut state = (*validation).clone();
            state.touch(field);
            state.recompute(&next, &config::form_config());
            values.set(next);
            validation.set(state);
        })
    };

    let blur_field = |field: Field| {
        let values = values.clone();
        let validation = validation.clone();
        Callback::from(move |_: FocusEvent| {
            let mut state = (*validation).clone();
            state.touch(field);
            state.recompute(&values, &config::form_config());
            validation.set(state);
        })
    };

    let on_full_name = edit_field(|v, s| v.full_name = s);
    let on_phone = edit_field(|v, s| v.phone = s);
    let on_email = edit_field(|v, s| v.email = s);
    let on_looking_for = select_field(Field::LookingFor, |v, s| v.looking_for = s);
    let on_budget = select_field(Field::Budget, |v, s| v.budget = s);

    let on_terms = {
        let values = values.clone();
        let validation = validation.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut next = (*values).clone();
            next.terms = input.checked();
            let mut state = (*validation).clone();
            state.touch(Field::Terms);
            state.recompute(&next, &config::form_config());
            values.set(next);
            validation.set(state);
        })
    };

    let onsubmit = {
        let values = values.clone();
        let validation = validation.clone();
        let attribution = attribution.clone();
        let is_submitting = is_submitting.clone();
        let success = success.clone();
        let error = error.clone();
        let pipeline = pipeline.clone();
        let navigator = navigator.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            // a submit attempt surfaces every latent error
            let mut state = (*validation).clone();
            state.touch_all();
            state.recompute(&values, &config::form_config());
            validation.set(state);

            let record = match pipeline.borrow_mut().begin(
                &values,
                &attribution,
                &BrowserStore,
                ClientMeta::from_window(),
            ) {
                Ok(record) => record,
                Err(SubmitBlocked::InFlight) => return,
                Err(SubmitBlocked::Invalid) => {
                    log!("submit blocked by validation");
                    return;
                }
            };

            is_submitting.set(true);
            let values = values.clone();
            let validation = validation.clone();
            let is_submitting = is_submitting.clone();
            let success = success.clone();
            let error = error.clone();
            let pipeline = pipeline.clone();
            let navigator = navigator.clone();
            spawn_local(async move {
                let outcome = deliver(&record).await;
                let settled = pipeline.borrow_mut().finish(outcome);
                is_submitting.set(false);

                match settled {
                    Settled::Delivered { status } => {
                        success.set(Some(status.to_string()));
                        error.set(None);
                        values.set(FormValues::default());
                        validation.set(ValidationState::default());

                        let navigator = navigator.clone();
                        spawn_local(async move {
                            TimeoutFuture::new(NAVIGATE_DELAY_MS).await;
                            navigator.push(&Route::ThankYou);
                        });
                    }
                    Settled::Failed { status } => {
                        error.set(Some(status.to_string()));
                        success.set(None);
                    }
                }

                let success = success.clone();
                let error = error.clone();
                Timeout::new(STATUS_CLEAR_MS, move || {
                    success.set(None);
                    error.set(None);
                })
                .forget();
            });
        })
    };

    let field_error = |field: Field| -> Html {
        match validation.error_for(field) {
            Some(msg) => html! { <p class="field-error">{msg}</p> },
            None => html! {},
        }
    };

    let input_class = |field: Field| -> Classes {
        classes!(
            "form-input",
            validation.error_for(field).map(|_| "input-error")
        )
    };

    let select_class = |field: Field, value: &str| -> Classes {
        classes!(
            "form-input",
            validation.error_for(field).map(|_| "input-error"),
            value.is_empty().then_some("placeholder-tint")
        )
    };

    html! {
        <div class="landing">
            <style>
            {r#".landing {
                min-height: 100vh;
                position: relative;
            }
            .hero {
                position: relative;
                width: 100%;
                min-height: 60vh;
                background-image: url('/assets/banner.webp');
                background-size: cover;
                background-position: center;
                display: flex;
                align-items: center;
                justify-content: flex-start;
                padding: 4rem 2rem;
            }
            .hero::after {
                content: '';
                position: absolute;
                inset: 0;
                background: linear-gradient(to right, rgba(10, 20, 40, 0.75), rgba(10, 20, 40, 0.2));
            }
            .hero-copy {
                position: relative;
                z-index: 1;
                max-width: 540px;
                color: #fff;
            }
            .hero-copy h1 {
                font-size: 2.5rem;
                margin-bottom: 1rem;
            }
            .hero-copy p {
                font-size: 1.1rem;
                color: rgba(255, 255, 255, 0.85);
            }
            .enquiry-wrap {
                display: flex;
                justify-content: center;
                padding: 2rem 1rem 4rem;
            }
            .enquiry-card {
                background: #fff;
                border: 1px solid #eee;
                border-radius: 16px;
                box-shadow: 0 8px 32px rgba(0, 0, 0, 0.12);
                padding: 2rem;
                width: 100%;
                max-width: 420px;
            }
            .enquiry-card h2 {
                text-align: center;
                font-size: 1.4rem;
                color: #1a2a4a;
                margin-bottom: 0.5rem;
            }
            .enquiry-card .blurb {
                text-align: center;
                font-size: 0.9rem;
                color: #667;
                margin-bottom: 1.5rem;
            }
            .status-banner {
                text-align: center;
                font-weight: 600;
                font-size: 0.9rem;
                margin-bottom: 1rem;
            }
            .status-banner.ok { color: #16a34a; }
            .status-banner.err { color: #dc2626; }
            .enquiry-card form > div { margin-bottom: 1rem; }
            .form-input {
                width: 100%;
                border: 1px solid #d1d5db;
                border-radius: 8px;
                padding: 0.7rem 0.8rem;
                font-size: 0.9rem;
                color: #1a2a4a;
            }
            .form-input:focus {
                outline: none;
                border-color: #1e50a0;
                box-shadow: 0 0 0 2px rgba(30, 80, 160, 0.2);
            }
            .input-error {
                border-color: #ef4444;
                background-color: #fef2f2;
            }
            .placeholder-tint { color: #9aa0ab; }
            .field-error {
                color: #ef4444;
                font-size: 0.75rem;
                margin-top: 0.25rem;
            }
            .terms-row {
                display: flex;
                align-items: center;
                gap: 0.5rem;
                font-size: 0.8rem;
                color: #667;
            }
            .submit-button {
                width: 100%;
                border: none;
                border-radius: 8px;
                padding: 0.8rem 1rem;
                font-weight: 700;
                font-size: 0.9rem;
                color: #fff;
                background: #1e3a8a;
                cursor: pointer;
                transition: background 0.2s;
            }
            .submit-button:hover { background: #1e50a0; }
            .submit-button:disabled {
                background: #9ca3af;
                cursor: not-allowed;
            }
            @media (max-width: 768px) {
                .hero { min-height: 40vh; padding: 2rem 1rem; }
                .hero-copy h1 { font-size: 1.8rem; }
            }"#}
            </style>

            <section class="hero">
                <div class="hero-copy">
                    <h1>{"Crestview Residences"}</h1>
                    <p>{"Waterfront villas, apartments and penthouses in a gated community. Flexible payment plans available for a limited time."}</p>
                </div>
            </section>

            <div id="form" class="enquiry-wrap">
                <div class="enquiry-card">
                    <h2>{"ENQUIRE NOW"}</h2>
                    <p class="blurb">
                        {"Simply fill in the enquiry form below and we'll be in touch with you soon to help you find your dream property!"}
                    </p>

                    {
                        if let Some(msg) = (*success).as_ref() {
                            html! { <div class="status-banner ok">{msg}</div> }
                        } else if let Some(msg) = (*error).as_ref() {
                            html! { <div class="status-banner err">{msg}</div> }
                        } else {
                            html! {}
                        }
                    }

                    <form onsubmit={onsubmit}>
                        <div>
                            <input
                                type="text"
                                name="fullName"
                                placeholder="Full Name *"
                                value={values.full_name.clone()}
                                class={input_class(Field::FullName)}
                                oninput={on_full_name}
                                onblur={blur_field(Field::FullName)}
                            />
                            { field_error(Field::FullName) }
                        </div>

                        <div>
                            <input
                                type="email"
                                name="email"
                                placeholder="Email Address *"
                                value={values.email.clone()}
                                class={input_class(Field::Email)}
                                oninput={on_email}
                                onblur={blur_field(Field::Email)}
                            />
                            { field_error(Field::Email) }
                        </div>

                        <div>
                            <input
                                type="tel"
                                name="phone"
                                placeholder="Phone Number *"
                                value={values.phone.clone()}
                                class={input_class(Field::Phone)}
                                oninput={on_phone}
                                onblur={blur_field(Field::Phone)}
                            />
                            { field_error(Field::Phone) }
                        </div>

                        <div>
                            <select
                                name="lookingFor"
                                class={select_class(Field::LookingFor, &values.looking_for)}
                                onchange={on_looking_for}
                            >
                                <option value="" disabled=true selected={values.looking_for.is_empty()}>
                                    {"What are you looking for? *"}
                                </option>
                                {
                                    PropertyType::ALL.iter().map(|p| html! {
                                        <option value={p.label()} selected={values.looking_for == p.label()}>
                                            {p.label()}
                                        </option>
                                    }).collect::<Html>()
                                }
                            </select>
                            { field_error(Field::LookingFor) }
                        </div>

                        <div>
                            <select
                                name="budget"
                                class={select_class(Field::Budget, &values.budget)}
                                onchange={on_budget}
                            >
                                <option value="" disabled=true selected={values.budget.is_empty()}>
                                    {"What is your budget? *"}
                                </option>
                                {
                                    BudgetBand::ALL.iter().map(|b| html! {
                                        <option value={b.label()} selected={values.budget == b.label()}>
                                            {b.label()}
                                        </option>
                                    }).collect::<Html>()
                                }
                            </select>
                            { field_error(Field::Budget) }
                        </div>

                        {
                            if config::form_config().require_terms {
                                html! {
                                    <div>
                                        <label class="terms-row">
                                            <input
                                                type="checkbox"
                                                name="terms"
                                                checked={values.terms}
                                                onchange={on_terms}
                                            />
                                            {"I accept the terms and privacy policy *"}
                                        </label>
                                        { field_error(Field::Terms) }
                                    </div>
                                }
                            } else {
                                html! {}
                            }
                        }

                        <button type="submit" class="submit-button" disabled={*is_submitting}>
                            { if *is_submitting { "SUBMITTING..." } else { "SUBMIT ENQUIRY" } }
                        </button>
                    </form>
                </div>
            </div>
        </div>
    }
}
