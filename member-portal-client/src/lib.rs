pub mod api;
mod components;
pub mod config;
pub mod pages;
pub mod resource;
pub mod scope;
pub mod session;

use leptos::*;
use leptos_router::*;

pub use crate::config::AppConfig;
use crate::{
    api::{AuthorizedApi, UnauthorizedApi},
    pages::{
        add_member::AddMember, home::Home, login::Login, member_detail::MemberDetail,
        register::Register, Page,
    },
    session::Session,
};

#[component]
pub fn App(cx: Scope, config: AppConfig) -> impl IntoView {
    let session = Session::local();
    let unauthorized_api = UnauthorizedApi::new(config.backend_url);
    let authorized_api = AuthorizedApi::new(config.backend_url, session.clone());
    log::debug!("Using backend at {}", config.backend_url);

    let login_api = unauthorized_api.clone();
    let home_api = authorized_api.clone();
    let detail_api = authorized_api.clone();

    view! {
        cx,
        <Router>
            <main>
                <Routes>
                    <Route
                        path=Page::Home.path()
                        view=move |cx| view! { cx, <Home api=home_api.clone()/> }
                    />
                    <Route
                        path=Page::Login.path()
                        view=move |cx| {
                            view! { cx, <Login api=login_api.clone() session=session.clone()/> }
                        }
                    />
                    <Route
                        path=Page::Register.path()
                        view=move |cx| view! { cx, <Register api=unauthorized_api.clone()/> }
                    />
                    <Route
                        path=Page::MemberDetail.path()
                        view=move |cx| view! { cx, <MemberDetail api=detail_api.clone()/> }
                    />
                    <Route
                        path=Page::AddMember.path()
                        view=move |cx| view! { cx, <AddMember api=authorized_api.clone()/> }
                    />
                </Routes>
            </main>
        </Router>
    }
}
