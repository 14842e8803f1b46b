use leptos::prelude::*;

use crate::pages::PageView;
use crate::sections::composer::RenderedSection;

#[server]
pub async fn get_page_view(path: String) -> Result<Option<PageView>, ServerFnError> {
    use crate::pages::{load_page_view_or_empty, PageRoute};
    use crate::preview::draft_mode::DraftMode;
    use crate::state::AppState;

    let state = leptos::prelude::use_context::<AppState>()
        .ok_or_else(|| ServerFnError::new("AppState not found in context"))?;
    let draft: DraftMode = leptos_axum::extract_with_state(&state)
        .await
        .unwrap_or_default();

    let Some(route) = PageRoute::from_path(&path) else {
        return Ok(None);
    };

    Ok(load_page_view_or_empty(
        state.content_client.as_ref(),
        &route,
        draft.perspective(),
        &state.log_buffer,
    )
    .await)
}

/// Composed sections in source order.
#[component]
pub fn PageSections(sections: Vec<RenderedSection>) -> impl IntoView {
    sections
        .into_iter()
        .map(|section| {
            view! { <div class="page-section" data-section=section.kind inner_html=section.html></div> }
        })
        .collect_view()
}

/// Page body for the current path, with a not-found view for documents
/// that do not exist. A content outage renders an empty body.
#[component]
pub fn ContentPage() -> impl IntoView {
    let location = leptos_router::hooks::use_location();
    let page = Resource::new(move || location.pathname.get(), get_page_view);

    view! {
        <Suspense fallback=|| view! { <p class="container py-24">"Loading..."</p> }>
            {move || page.get().map(|res| match res {
                Ok(Some(page)) => {
                    let title = page
                        .seo
                        .as_ref()
                        .and_then(|s| s.meta_title.clone())
                        .unwrap_or_else(|| page.title.clone());
                    let description = page
                        .seo
                        .as_ref()
                        .and_then(|s| s.meta_description.clone())
                        .unwrap_or_default();
                    let no_index = page.seo.as_ref().map(|s| s.no_index).unwrap_or(false);
                    view! {
                        <leptos_meta::Title text=title/>
                        <leptos_meta::Meta name="description" content=description/>
                        {no_index.then(|| view! { <leptos_meta::Meta name="robots" content="noindex"/> })}
                        <PageSections sections=page.sections/>
                    }
                    .into_any()
                }
                Ok(None) => view! { <NotFound/> }.into_any(),
                // Content reads degrade on the server; this is only reached
                // when the server function itself cannot be called.
                Err(e) => {
                    leptos::logging::warn!("Page content unavailable: {e}");
                    ().into_any()
                }
            })}
        </Suspense>
    }
}

#[component]
pub fn NotFound() -> impl IntoView {
    #[cfg(feature = "ssr")]
    {
        if let Some(response) = use_context::<leptos_axum::ResponseOptions>() {
            response.set_status(axum::http::StatusCode::NOT_FOUND);
        }
    }

    view! {
        <section class="container py-24 text-center">
            <h1 class="text-4xl font-bold mb-4">"Page not found"</h1>
            <a href="/" class="btn btn-primary">"Back to home"</a>
        </section>
    }
}
