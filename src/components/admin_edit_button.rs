use leptos::prelude::*;
use leptos_router::hooks::use_location;

use crate::preview::resolver::admin_edit_url;

/// Floating link into the Studio document behind the current page.
#[component]
pub fn AdminEditButton(studio_url: String) -> impl IntoView {
    let location = use_location();
    let edit_url = move || admin_edit_url(&studio_url, &location.pathname.get());

    move || {
        edit_url().map(|href| {
            view! {
                <a
                    href=href
                    target="_blank"
                    rel="noopener noreferrer"
                    class="admin-edit-button fixed bottom-12 right-4 z-50 btn btn-primary shadow-lg"
                >
                    "Edit in Studio"
                </a>
            }
        })
    }
}
