use leptos::prelude::*;
use leptos_meta::{provide_meta_context, MetaTags, Stylesheet, Title};
use leptos_router::components::*;
use leptos_router::path;

use crate::components::page_sections::{ContentPage, NotFound};
use crate::components::site_chrome::SiteChrome;

pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Stylesheet id="leptos" href="/pkg/iis-web.css"/>
        <Title text="Integrated Inspection Systems"/>

        <Router>
            <SiteChrome>
                <Routes fallback=|| view! { <NotFound/> }>
                    <Route path=path!("/") view=ContentPage/>
                    <Route path=path!("/services/:slug") view=ContentPage/>
                    <Route path=path!("/industries/:slug") view=ContentPage/>
                    <Route path=path!("/resources/:category/:slug") view=ContentPage/>
                    <Route path=path!("/compliance/:slug") view=ContentPage/>
                    <Route path=path!("/:slug") view=ContentPage/>
                </Routes>
            </SiteChrome>
        </Router>
    }
}
