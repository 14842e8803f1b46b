use leptos::prelude::*;
use leptos_router::hooks::use_location;

/// Fixed banner shown while draft mode is on, linking to the exit
/// endpoint with the current page as the return path.
#[component]
pub fn PreviewBanner(enabled: bool) -> impl IntoView {
    let location = use_location();
    let exit_href = move || {
        format!(
            "/api/exit-preview?redirect={}",
            urlencoding::encode(&location.pathname.get())
        )
    };

    view! {
        <Show when=move || enabled>
            <div class="preview-banner fixed bottom-0 inset-x-0 z-50 bg-amber-500 text-black text-sm text-center py-2">
                "Preview mode is ON. You are viewing draft content. "
                <a href=exit_href class="underline font-semibold" rel="external">"Exit preview"</a>
            </div>
        </Show>
    }
}
