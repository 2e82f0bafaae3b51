use std::rc::Rc;

use leptos::*;
use leptos_router::*;
use member_portal_common::Credentials;

use crate::{
    api::{AuthApi, UnauthorizedApi},
    components::credentials::{CredentialInput, CredentialsCard},
    pages::Page,
    scope::ScreenScope,
    session::Session,
};

pub const MISSING_FIELDS: &str = "Email and password must be filled!";
pub const MISSING_TOKEN: &str = "Invalid credentials!";
pub const REJECTED: &str = "Invalid credentials.";
pub const SERVER_ERROR: &str = "Server Error.";
pub const STORE_FAILED: &str = "Could not store the session token.";

/// Run a login attempt. On success the token is persisted in `session` and the page to navigate
/// to is returned, otherwise the message to show.
pub async fn submit_login<A>(
    api: &A,
    session: &Session,
    credentials: &Credentials,
) -> Result<Page, String>
where
    A: AuthApi + ?Sized,
{
    if credentials.email.is_empty() || credentials.password.is_empty() {
        return Err(MISSING_FIELDS.to_owned());
    }
    let response = match api.login(credentials).await {
        Ok(inner) => inner,
        Err(crate::api::Error::UnexpectedStatus(status)) => {
            log::error!("Login answered with status {status}");
            return Err(SERVER_ERROR.to_owned());
        }
        Err(error) => {
            log::error!("Unable to login with {}. {error}", credentials.email);
            return Err(REJECTED.to_owned());
        }
    };
    let Some(token) = response.token.filter(|token| !token.is_empty()) else {
        log::warn!("Login for {} returned no token", credentials.email);
        return Err(MISSING_TOKEN.to_owned());
    };
    if let Err(error) = session.store_token(&token) {
        log::error!("{error}");
        return Err(STORE_FAILED.to_owned());
    }
    log::info!("Logged in as {}", credentials.email);
    Ok(Page::Home)
}

#[component]
pub fn Login(cx: Scope, api: UnauthorizedApi, session: Session) -> impl IntoView {
    let scope = ScreenScope::new(cx);
    let api = api.scoped(&scope);
    let navigate = Rc::new(use_navigate(cx));
    let (email, set_email) = create_signal(cx, String::new());
    let (password, set_password) = create_signal(cx, String::new());
    let (login_error, set_login_error) = create_signal(cx, None::<String>);

    let login_action = create_action(cx, move |credentials: &Credentials| {
        let credentials = credentials.clone();
        let api = api.clone();
        let session = session.clone();
        let scope = scope.clone();
        let navigate = Rc::clone(&navigate);
        async move {
            set_login_error.set(None);
            let Some(result) = scope.run(submit_login(&api, &session, &credentials)).await else {
                return;
            };
            match result {
                Ok(page) => {
                    if let Err(error) = navigate(page.path(), Default::default()) {
                        log::error!("Could not navigate to {}. {error:?}", page.path());
                    }
                }
                Err(message) => set_login_error.set(Some(message)),
            }
        }
    });
    let pending = login_action.pending();

    view! { cx,
        <CredentialsCard
            title="Login"
            submit_label="Login"
            error=login_error
            pending=pending
            on_submit=move || login_action.dispatch(Credentials::new(email.get(), password.get()))
        >
            <CredentialInput
                id="email"
                label="Email"
                input_type="email"
                placeholder="Enter your e-mail"
                value=email
                set_value=set_email/>
            <CredentialInput
                id="password"
                label="Password"
                input_type="password"
                placeholder="Enter your password"
                value=password
                set_value=set_password/>
        </CredentialsCard>
        <p class="auth-switch">
            "No account yet? "
            <A href=Page::Register.path()>"Register"</A>
        </p>
    }
}
