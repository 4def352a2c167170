//! Status bar component.
//!
//! Displays the connected address and network.

use leptos::prelude::*;
use leptos_icons::Icon;

use crate::app::AppContext;
use crate::components::icons as ic;
use crate::core::chains::{chain_data, network_name};

stylance::import_crate_style!(css, "src/components/status/status.module.css");

/// Status bar showing the wallet address, network and connection method.
///
/// Shows `—` for both values while disconnected; hovering the address
/// reveals the full checksummed form.
#[component]
pub fn Status() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided at root");
    let state = ctx.store.state;

    let address = Signal::derive(move || {
        state.with(|s| {
            if s.is_connected() {
                s.display_address()
            } else {
                "—".to_string()
            }
        })
    });
    let full_address = Signal::derive(move || {
        state.with(|s| {
            s.address
                .map(|a| a.to_checksum(None))
                .unwrap_or_default()
        })
    });
    let network = Signal::derive(move || {
        state.with(|s| {
            if s.is_connected() {
                network_name(s.chain_id)
            } else {
                "—".to_string()
            }
        })
    });
    let network_details = Signal::derive(move || {
        state.with(|s| match (s.chain_id, chain_data(s.chain_id)) {
            (Some(id), Some(data)) => {
                format!("{} · chain {} · {}", data.short_name, id, data.native_currency)
            }
            (Some(id), None) => format!("chain {}", id),
            (None, _) => String::new(),
        })
    });
    let via = Signal::derive(move || {
        state.with(|s| s.provider.as_ref().map(|p| p.kind().label()))
    });

    view! {
        <header class=css::bar>
            <span class=css::label>
                <span class=css::label_icon><Icon icon=ic::USER /></span>
                <span class=css::label_text>"Address:"</span>
                <span class=css::value title=full_address>{address}</span>
            </span>

            <span class=css::label_purple>
                <span class=css::label_icon><Icon icon=ic::NETWORK /></span>
                <span class=css::label_text>"Network:"</span>
                <span class=css::value title=network_details>{network}</span>
            </span>

            <Show when=move || via.get().is_some()>
                <span class=css::via>
                    {move || via.get().map(|label| format!("via {}", label))}
                </span>
            </Show>
        </header>
    }
}
