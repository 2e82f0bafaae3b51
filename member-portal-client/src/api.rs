use async_trait::async_trait;
use gloo_net::http::{Request, Response};
use member_portal_common::{Credentials, LoginResponse, Member, MemberId, NewMember, User};
use serde::de::DeserializeOwned;
use thiserror::Error;
use wasm_bindgen::JsValue;
use web_sys::{AbortSignal, FormData};

use crate::{scope::ScreenScope, session::Session};

const STATUS_OK: u16 = 200;
const STATUS_CREATED: u16 = 201;
const STATUS_NOT_FOUND: u16 = 404;

/// Endpoints reachable without a session token
#[async_trait(?Send)]
pub trait AuthApi {
    /// Exchange credentials for a token. Only a 200 response counts as an answer, the token
    /// inside may still be absent.
    /// # Errors
    /// This function will return an error if the request fails or the backend does not answer 200
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse>;
    /// Create a new user account
    /// # Errors
    /// This function will return an error if the request fails or the backend does not answer 201
    async fn register(&self, credentials: &Credentials) -> Result<()>;
}

/// Endpoints that require the bearer token
#[async_trait(?Send)]
pub trait MembersApi {
    async fn members(&self) -> Result<Vec<Member>>;
    /// Fetch a single member, [None] when the backend answers 404
    async fn member(&self, id: MemberId) -> Result<Option<Member>>;
    async fn users_not_in_members(&self) -> Result<Vec<User>>;
    async fn create_member(&self, member: &NewMember, picture: &Picture) -> Result<()>;
}

/// Picture selected in the add member form, read into memory before upload
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Picture {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl Picture {
    /// Read the contents of a file picked from an `<input type="file">`
    /// # Errors
    /// This function will return an error if the browser cannot read the file
    pub async fn read(file: web_sys::File) -> Result<Self> {
        let file = gloo_file::File::from(file);
        let bytes = gloo_file::futures::read_as_bytes(&file)
            .await
            .map_err(|error| Error::Js(error.to_string()))?;
        Ok(Self {
            file_name: file.name(),
            content_type: file.raw_mime_type(),
            bytes,
        })
    }
}

#[derive(Clone)]
pub struct UnauthorizedApi {
    url: &'static str,
    signal: Option<AbortSignal>,
}

impl UnauthorizedApi {
    pub const fn new(url: &'static str) -> Self {
        Self { url, signal: None }
    }

    /// Copy of this API whose requests are aborted when `scope` is cancelled
    pub fn scoped(&self, scope: &ScreenScope) -> Self {
        Self {
            url: self.url,
            signal: scope.abort_signal(),
        }
    }

    async fn post_credentials(&self, path: &str, credentials: &Credentials) -> Result<Response> {
        let url = format!("{}{path}", self.url);
        log::debug!("POST {url}");
        let response = Request::post(&url)
            .abort_signal(self.signal.as_ref())
            .json(credentials)?
            .send()
            .await?;
        Ok(response)
    }
}

#[async_trait(?Send)]
impl AuthApi for UnauthorizedApi {
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse> {
        let response = self.post_credentials("/api/auth/login", credentials).await?;
        let response = expect_status(response, STATUS_OK).await?;
        Ok(response.json::<LoginResponse>().await?)
    }

    async fn register(&self, credentials: &Credentials) -> Result<()> {
        let response = self
            .post_credentials("/api/auth/register", credentials)
            .await?;
        expect_status(response, STATUS_CREATED).await?;
        Ok(())
    }
}

#[derive(Clone)]
pub struct AuthorizedApi {
    url: &'static str,
    session: Session,
    signal: Option<AbortSignal>,
}

impl AuthorizedApi {
    pub fn new(url: &'static str, session: Session) -> Self {
        Self {
            url,
            session,
            signal: None,
        }
    }

    /// Copy of this API whose requests are aborted when `scope` is cancelled
    pub fn scoped(&self, scope: &ScreenScope) -> Self {
        Self {
            url: self.url,
            session: self.session.clone(),
            signal: scope.abort_signal(),
        }
    }

    /// Value of the `Authorization` header. Checked before any request is built so that a missing
    /// token never reaches the network.
    fn auth_header_value(&self) -> Result<String> {
        let Some(token) = self.session.token() else {
            return Err(Error::MissingToken);
        };
        Ok(format!("Bearer {token}"))
    }

    async fn send(&self, request: Request, auth: &str) -> Result<Response> {
        let response = request
            .header("Authorization", auth)
            .abort_signal(self.signal.as_ref())
            .send()
            .await?;
        Ok(response)
    }

    async fn get<T>(&self, path: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let auth = self.auth_header_value()?;
        let url = format!("{}{path}", self.url);
        log::debug!("GET {url}");
        let response = self.send(Request::get(&url), &auth).await?;
        let response = expect_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}

#[async_trait(?Send)]
impl MembersApi for AuthorizedApi {
    async fn members(&self) -> Result<Vec<Member>> {
        self.get("/api/members").await
    }

    async fn member(&self, id: MemberId) -> Result<Option<Member>> {
        let auth = self.auth_header_value()?;
        let url = format!("{}/api/members/{id}", self.url);
        log::debug!("GET {url}");
        let response = self.send(Request::get(&url), &auth).await?;
        if response.status() == STATUS_NOT_FOUND {
            return Ok(None);
        }
        let response = expect_success(response).await?;
        Ok(Some(response.json::<Member>().await?))
    }

    async fn users_not_in_members(&self) -> Result<Vec<User>> {
        self.get("/api/auth/users/not-in-members").await
    }

    async fn create_member(&self, member: &NewMember, picture: &Picture) -> Result<()> {
        let auth = self.auth_header_value()?;
        let url = format!("{}/api/members", self.url);
        let form = member_form(member, picture)?;
        log::debug!("POST {url} (multipart, picture {})", picture.file_name);
        let response = self.send(Request::post(&url).body(form), &auth).await?;
        expect_success(response).await?;
        Ok(())
    }
}

/// Multipart body of a create member request: the member as JSON text plus the picture file.
/// The browser supplies the multipart boundary header.
fn member_form(member: &NewMember, picture: &Picture) -> Result<FormData> {
    let form = FormData::new()?;
    form.append_with_str("member", &member_part(member)?)?;
    let content_type = picture_type(picture);
    let blob: web_sys::Blob =
        gloo_file::Blob::new_with_options(picture.bytes.as_slice(), content_type).into();
    form.append_with_blob_and_filename("picture", &blob, &picture.file_name)?;
    Ok(form)
}

/// Text of the `member` part. An unset superior is sent as an explicit `null`.
fn member_part(member: &NewMember) -> Result<String> {
    Ok(serde_json::to_string(member)?)
}

/// MIME type given to the `picture` part, left to the browser when the file reported none
fn picture_type(picture: &Picture) -> Option<&str> {
    Some(picture.content_type.as_str()).filter(|content_type| !content_type.is_empty())
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Fetch(#[from] gloo_net::Error),
    #[error("API error ({status})\n{message}")]
    Status { status: u16, message: String },
    #[error("Unexpected response status {0}")]
    UnexpectedStatus(u16),
    #[error("JSON error\n{0}")]
    Json(#[from] serde_json::Error),
    #[error("Browser API error\n{0}")]
    Js(String),
    #[error("No session token stored, login required")]
    MissingToken,
}

impl From<JsValue> for Error {
    fn from(value: JsValue) -> Self {
        Self::Js(format!("{value:?}"))
    }
}

impl Error {
    /// Message sent back by the backend with a failed response, if it sent any
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Status { message, .. } if !message.trim().is_empty() => Some(message),
            _ => None,
        }
    }
}

async fn failure(response: Response) -> Error {
    let status = response.status();
    let message = match response.text().await {
        Ok(text) => text,
        Err(error) => {
            log::warn!("Could not read body of failed response ({status}). {error}");
            String::new()
        }
    };
    Error::Status { status, message }
}

async fn expect_success(response: Response) -> Result<Response> {
    // ensure we've got 2xx status
    if response.ok() {
        return Ok(response);
    }
    Err(failure(response).await)
}

async fn expect_status(response: Response, expected: u16) -> Result<Response> {
    let status = response.status();
    if status == expected {
        return Ok(response);
    }
    if response.ok() {
        return Err(Error::UnexpectedStatus(status));
    }
    Err(failure(response).await)
}
