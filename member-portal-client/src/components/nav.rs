use leptos::*;
use leptos_router::*;

use crate::pages::Page;

#[component]
pub fn NavBar(cx: Scope) -> impl IntoView {
    view! { cx,
        <nav class="navbar" role="navigation" aria-label="main navigation">
            <div class="navbar-brand">
                <A href=Page::Home.path()>
                    <span class="navbar-title">"Management"</span>
                </A>
                <p class="navbar-subtitle">"App"</p>
            </div>
        </nav>
    }
}
