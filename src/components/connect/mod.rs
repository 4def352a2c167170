//! Connect / disconnect button.

use leptos::prelude::*;
use leptos_icons::Icon;

use crate::app::AppContext;
use crate::components::icons as ic;

stylance::import_crate_style!(css, "src/components/connect/connect.module.css");

/// Green "Connect" while disconnected, red "Disconnect" once connected.
#[component]
pub fn ConnectButton() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided at root");
    let connected = Signal::derive(move || ctx.store.state.with(|s| s.is_connected()));

    let on_click = move |_: leptos::ev::MouseEvent| {
        if connected.get_untracked() {
            ctx.disconnect();
        } else {
            ctx.connect();
        }
    };
    let label = move || match (connected.get(), ctx.connecting.get()) {
        (true, _) => "Disconnect",
        (false, true) => "Connecting...",
        (false, false) => "Connect",
    };

    view! {
        <button
            type="button"
            class=move || if connected.get() { css::disconnect } else { css::connect }
            disabled=move || ctx.connecting.get() && !connected.get()
            on:click=on_click
        >
            <Icon icon=ic::WALLET />
            <span>{label}</span>
        </button>
        <Show when=move || ctx.last_error.get().is_some()>
            <p class=css::error>{move || ctx.last_error.get().unwrap_or_default()}</p>
        </Show>
    }
}
