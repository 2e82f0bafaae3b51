use std::rc::Rc;

use leptos::*;
use leptos_router::*;
use member_portal_common::Credentials;

use crate::{
    api::{AuthApi, Error, UnauthorizedApi},
    components::credentials::{CredentialInput, CredentialsCard},
    pages::Page,
    scope::ScreenScope,
};

pub const MISSING_FIELDS: &str = "Email, password, and confirm password must be filled!";
pub const PASSWORD_MISMATCH: &str = "Passwords do not match!";
pub const REGISTRATION_FAILED: &str = "Registration failed. Please try again.";
pub const SERVER_ERROR: &str = "Server error.";

#[derive(Clone, Debug, Default)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl Registration {
    /// Local checks performed before anything is sent
    fn validate(&self) -> Result<(), &'static str> {
        if self.email.is_empty() || self.password.is_empty() || self.confirm_password.is_empty() {
            return Err(MISSING_FIELDS);
        }
        if self.password != self.confirm_password {
            return Err(PASSWORD_MISMATCH);
        }
        Ok(())
    }
}

/// Register a new account, returning the page to navigate to or the message to show
pub async fn submit_registration<A>(api: &A, registration: &Registration) -> Result<Page, String>
where
    A: AuthApi + ?Sized,
{
    registration.validate().map_err(str::to_owned)?;
    let credentials = Credentials::new(&registration.email, &registration.password);
    match api.register(&credentials).await {
        Ok(()) => {
            log::info!("Registered {}", registration.email);
            Ok(Page::Login)
        }
        Err(Error::UnexpectedStatus(status)) => {
            log::error!("Registration answered with status {status}");
            Err(REGISTRATION_FAILED.to_owned())
        }
        Err(error) => {
            log::error!("Unable to register {}. {error}", registration.email);
            Err(error
                .server_message()
                .map_or_else(|| SERVER_ERROR.to_owned(), str::to_owned))
        }
    }
}

#[component]
pub fn Register(cx: Scope, api: UnauthorizedApi) -> impl IntoView {
    let scope = ScreenScope::new(cx);
    let api = api.scoped(&scope);
    let navigate = Rc::new(use_navigate(cx));
    let (email, set_email) = create_signal(cx, String::new());
    let (password, set_password) = create_signal(cx, String::new());
    let (confirm_password, set_confirm_password) = create_signal(cx, String::new());
    let (register_error, set_register_error) = create_signal(cx, None::<String>);

    let register_action = create_action(cx, move |registration: &Registration| {
        let registration = registration.clone();
        let api = api.clone();
        let scope = scope.clone();
        let navigate = Rc::clone(&navigate);
        async move {
            set_register_error.set(None);
            let Some(result) = scope.run(submit_registration(&api, &registration)).await else {
                return;
            };
            match result {
                Ok(page) => {
                    if let Err(error) = navigate(page.path(), Default::default()) {
                        log::error!("Could not navigate to {}. {error:?}", page.path());
                    }
                }
                Err(message) => set_register_error.set(Some(message)),
            }
        }
    });
    let pending = register_action.pending();
    let on_submit = move || {
        register_action.dispatch(Registration {
            email: email.get(),
            password: password.get(),
            confirm_password: confirm_password.get(),
        })
    };

    view! { cx,
        <CredentialsCard
            title="Register"
            submit_label="Register"
            error=register_error
            pending=pending
            on_submit=on_submit
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
            <CredentialInput
                id="confirmPassword"
                label="Confirm Password"
                input_type="password"
                placeholder="Confirm your password"
                value=confirm_password
                set_value=set_confirm_password/>
        </CredentialsCard>
        <p class="auth-switch">
            "Already registered? "
            <A href=Page::Login.path()>"Login"</A>
        </p>
    }
}

#[cfg(test)]
mod test {
    use rstest::rstest;

    use super::*;
    use crate::pages::test::{server_error, FakeAuthApi};

    fn registration(password: &str, confirm_password: &str) -> Registration {
        Registration {
            email: "erin@example.com".to_owned(),
            password: password.to_owned(),
            confirm_password: confirm_password.to_owned(),
        }
    }

    #[tokio::test]
    async fn mismatched_passwords_should_not_call_api() {
        let api = FakeAuthApi::default();

        let result = submit_registration(&api, &registration("secret1", "secret2")).await;

        assert_eq!(result, Err(PASSWORD_MISMATCH.to_owned()));
        assert_eq!(api.call_count(), 0);
    }

    #[tokio::test]
    async fn missing_confirmation_should_not_call_api() {
        let api = FakeAuthApi::default();

        let result = submit_registration(&api, &registration("secret1", "")).await;

        assert_eq!(result, Err(MISSING_FIELDS.to_owned()));
        assert_eq!(api.call_count(), 0);
    }

    #[tokio::test]
    async fn created_account_should_go_to_login() {
        let api = FakeAuthApi::default().with_register(Ok(()));

        let result = submit_registration(&api, &registration("secret1", "secret1")).await;

        assert_eq!(result, Ok(Page::Login));
        assert_eq!(*api.calls.borrow(), vec!["register erin@example.com".to_owned()]);
    }

    #[rstest]
    #[case(Error::UnexpectedStatus(200), REGISTRATION_FAILED)]
    #[case(Error::Status { status: 400, message: "Email already registered".to_owned() }, "Email already registered")]
    #[case(Error::Status { status: 502, message: String::new() }, SERVER_ERROR)]
    #[case(Error::Js("TypeError: Failed to fetch".to_owned()), SERVER_ERROR)]
    #[tokio::test]
    async fn failed_registration_should_map_to_message(
        #[case] error: Error,
        #[case] expected: &str,
    ) {
        let api = FakeAuthApi::default().with_register(Err(error));

        let result = submit_registration(&api, &registration("secret1", "secret1")).await;

        assert_eq!(result, Err(expected.to_owned()));
    }

    #[tokio::test]
    async fn server_failure_should_surface_body_text() {
        let api = FakeAuthApi::default().with_register(Err(server_error()));

        let result = submit_registration(&api, &registration("secret1", "secret1")).await;

        assert_eq!(result, Err("Internal Server Error".to_owned()));
    }
}
