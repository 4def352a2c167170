//! Landing page.

use leptos::prelude::*;

use crate::components::connect::ConnectButton;
use crate::components::status::Status;
use crate::components::wallet_modal::WalletModal;
use crate::config::APP_TITLE;

stylance::import_crate_style!(css, "src/components/home/home.module.css");

#[component]
pub fn Home() -> impl IntoView {
    view! {
        <div class=css::container>
            <Status />
            <main class=css::main>
                <h1 class=css::title>{APP_TITLE}</h1>
                <ConnectButton />
            </main>
            <WalletModal />
        </div>
    }
}
