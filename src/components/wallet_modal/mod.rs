//! Wallet chooser modal.
//!
//! Rendered while [`WebModal`](crate::core::WebModal) waits for a choice.
//! Picking an option or dismissing the dialog resolves the pending
//! `connect()`.

use icondata::Icon as IconData;
use leptos::prelude::*;
use leptos_icons::Icon;

use crate::app::AppContext;
use crate::components::icons as ic;
use crate::core::ProviderKind;

stylance::import_crate_style!(css, "src/components/wallet_modal/wallet_modal.module.css");

fn option_icon(kind: ProviderKind) -> IconData {
    match kind {
        ProviderKind::Injected => ic::WALLET,
        ProviderKind::WalletConnect => ic::QR_CODE,
    }
}

#[component]
pub fn WalletModal() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided at root");
    let open = ctx.bridge.with_value(|b| b.modal().is_open());
    let select =
        move |kind: Option<ProviderKind>| ctx.bridge.with_value(|b| b.modal().select(kind));

    view! {
        <Show when=move || open.get()>
            <div class=css::backdrop on:click=move |_| select(None)>
                <div
                    class=css::dialog
                    role="dialog"
                    on:click=|ev: leptos::ev::MouseEvent| ev.stop_propagation()
                >
                    <div class=css::dialog_header>
                        <h2>"Connect a wallet"</h2>
                        <button class=css::close title="Close" on:click=move |_| select(None)>
                            <Icon icon=ic::CLOSE />
                        </button>
                    </div>
                    {move || {
                        let options = ctx.bridge.with_value(|b| b.modal().options());
                        if options.is_empty() {
                            view! {
                                <p class=css::empty>
                                    "No wallet found. Install a browser wallet extension."
                                </p>
                            }
                                .into_any()
                        } else {
                            options
                                .into_iter()
                                .map(|kind| {
                                    view! {
                                        <button
                                            class=css::option
                                            on:click=move |_| select(Some(kind))
                                        >
                                            <Icon icon=option_icon(kind) />
                                            <span class=css::option_label>{kind.label()}</span>
                                            <span class=css::option_description>
                                                {kind.description()}
                                            </span>
                                        </button>
                                    }
                                })
                                .collect_view()
                                .into_any()
                        }
                    }}
                </div>
            </div>
        </Show>
    }
}
