use log::{info, Level};
use yew::prelude::*;
use yew_router::prelude::*;

mod config;
mod lead {
    pub mod attribution;
    pub mod form;
    pub mod pipeline;
    pub mod store;
}
mod pages {
    pub mod home;
    pub mod thank_you;
}

use pages::{home::Home, thank_you::ThankYou};

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/thank-you")]
    ThankYou,
}

fn switch(routes: Route) -> Html {
    match routes {
        Route::Home => {
            info!("Rendering Home page");
            html! { <Home /> }
        }
        Route::ThankYou => {
            info!("Rendering Thank You page");
            html! { <ThankYou /> }
        }
    }
}

#[function_component]
fn App() -> Html {
    html! {
        <BrowserRouter>
            <Switch<Route> render={switch} />
        </BrowserRouter>
    }
}

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(Level::Info).expect("error initializing log");

    info!("Starting application");
    yew::Renderer::<App>::new().render();
}
