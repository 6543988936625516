use yew::prelude::*;
use yew_router::components::Link;

use crate::Route;

#[function_component]
pub fn ThankYou() -> Html {
    html! {
        <div class="thank-you">
            <style>
            {r#".thank-you {
                min-height: 100vh;
                display: flex;
                align-items: center;
                justify-content: center;
                background: #fff;
                color: #111;
                padding: 1rem;
                text-align: center;
            }
            .thank-you .check {
                width: 4rem;
                height: 4rem;
                border-radius: 50%;
                background: #111;
                color: #fff;
                font-size: 1.8rem;
                font-weight: 700;
                line-height: 4rem;
                margin: 0 auto 1.5rem;
            }
            .thank-you h1 {
                font-size: 1.9rem;
                margin-bottom: 1rem;
            }
            .thank-you p { margin-bottom: 1.5rem; }
            .back-home {
                display: inline-block;
                background: #ca8a04;
                color: #fff;
                font-weight: 600;
                padding: 0.75rem 1.5rem;
                border-radius: 9999px;
            }
            .back-home:hover { background: #a16207; }"#}
            </style>
            <div>
                <div class="check">{"✔"}</div>
                <h1>{"You are all set!"}</h1>
                <p>{"Thank you for expressing interest. Our expert will contact you shortly."}</p>
                <Link<Route> to={Route::Home} classes="back-home">
                    {"⬅ GO BACK TO HOME"}
                </Link<Route>>
            </div>
        </div>
    }
}
