use std::rc::Rc;

use leptos::*;
use leptos_router::*;
use member_portal_common::{Member, MemberId, NewMember, Position, SuperiorRef, User, UserId};
use web_sys::HtmlInputElement;

use crate::{
    api::{self, AuthorizedApi, MembersApi, Picture},
    components::{nav::NavBar, status::ErrorAlert},
    pages::Page,
    resource::{IsEmpty, RemoteResource},
    scope::ScreenScope,
};

pub const FETCH_ERROR: &str = "Failed to fetch users or members. You need to login first.";
pub const ADD_ERROR: &str = "Failed to add member. You need to login first.";
pub const INCOMPLETE: &str = "Please complete every required field.";
pub const NO_USERS: &str = "Every user is already linked to a member.";

/// Choices offered by the form: users without a member and candidate superiors
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemberOptions {
    pub users: Vec<User>,
    pub members: Vec<Member>,
}

impl IsEmpty for MemberOptions {
    fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

async fn fetch_member_options<A>(api: &A) -> api::Result<MemberOptions>
where
    A: MembersApi + ?Sized,
{
    let users = api.users_not_in_members().await?;
    let members = api.members().await?;
    Ok(MemberOptions { users, members })
}

/// Fetch the unlinked users, then the existing members. Either failure fails the whole load.
pub async fn load_member_options<A>(api: &A) -> RemoteResource<MemberOptions>
where
    A: MembersApi + ?Sized,
{
    RemoteResource::from_result(fetch_member_options(api).await, FETCH_ERROR)
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemberDraft {
    pub name: String,
    pub position: Option<Position>,
    pub user_id: Option<UserId>,
    pub superior_id: Option<MemberId>,
}

impl MemberDraft {
    /// Payload for this draft, [None] while a required field is missing. The user's email is
    /// looked up in `users` and left empty when the user is not listed.
    pub fn to_new_member(&self, users: &[User]) -> Option<NewMember> {
        if self.name.trim().is_empty() {
            return None;
        }
        let position = self.position?;
        let user_id = self.user_id?;
        let email = users
            .iter()
            .find(|user| user.id == user_id)
            .map(|user| user.email.clone())
            .unwrap_or_default();
        Some(NewMember {
            name: self.name.clone(),
            position,
            user: User { id: user_id, email },
            superior: self.superior_id.map(|id| SuperiorRef { id }),
        })
    }
}

/// Send a completed draft with its picture, returning the page to navigate to or the message to
/// show
pub async fn submit_member<A>(
    api: &A,
    draft: &MemberDraft,
    users: &[User],
    picture: Option<&Picture>,
) -> Result<Page, String>
where
    A: MembersApi + ?Sized,
{
    let (Some(member), Some(picture)) = (draft.to_new_member(users), picture) else {
        return Err(INCOMPLETE.to_owned());
    };
    match api.create_member(&member, picture).await {
        Ok(()) => {
            log::info!("Added member {}", member.name);
            Ok(Page::Home)
        }
        Err(error) => {
            log::error!("Unable to add member {}. {error}", member.name);
            Err(ADD_ERROR.to_owned())
        }
    }
}

async fn add_member(
    api: &AuthorizedApi,
    draft: &MemberDraft,
    users: &[User],
    file: Option<web_sys::File>,
) -> Result<Page, String> {
    let picture = match file {
        Some(file) => match Picture::read(file).await {
            Ok(picture) => Some(picture),
            Err(error) => {
                log::error!("Could not read the selected picture. {error}");
                return Err(ADD_ERROR.to_owned());
            }
        },
        None => None,
    };
    submit_member(api, draft, users, picture.as_ref()).await
}

#[component]
pub fn AddMember(cx: Scope, api: AuthorizedApi) -> impl IntoView {
    let scope = ScreenScope::new(cx);
    let api = api.scoped(&scope);
    let navigate = Rc::new(use_navigate(cx));
    let (options, set_options) = create_signal(cx, RemoteResource::<MemberOptions>::Loading);
    let (name, set_name) = create_signal(cx, String::new());
    let (position, set_position) = create_signal(cx, String::new());
    let (user_id, set_user_id) = create_signal(cx, String::new());
    let (superior_id, set_superior_id) = create_signal(cx, String::new());
    let (picture, set_picture) = create_signal(cx, None::<web_sys::File>);
    let (submit_error, set_submit_error) = create_signal(cx, None::<String>);

    {
        let api = api.clone();
        let scope = scope.clone();
        spawn_local(async move {
            if let Some(state) = scope.run(load_member_options(&api)).await {
                set_options.set(state);
            }
        });
    }

    let add_action = create_action(
        cx,
        move |(draft, file): &(MemberDraft, Option<web_sys::File>)| {
            let draft = draft.clone();
            let file = file.clone();
            let api = api.clone();
            let scope = scope.clone();
            let navigate = Rc::clone(&navigate);
            let users = options.with_untracked(|options| {
                options
                    .ready()
                    .map(|options| options.users.clone())
                    .unwrap_or_default()
            });
            async move {
                set_submit_error.set(None);
                let Some(result) = scope.run(add_member(&api, &draft, &users, file)).await else {
                    return;
                };
                match result {
                    Ok(page) => {
                        if let Err(error) = navigate(page.path(), Default::default()) {
                            log::error!("Could not navigate to {}. {error:?}", page.path());
                        }
                    }
                    Err(message) => set_submit_error.set(Some(message)),
                }
            }
        },
    );
    let pending = add_action.pending();

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let draft = MemberDraft {
            name: name.get(),
            position: position.get().parse().ok(),
            user_id: user_id.get().parse().ok(),
            superior_id: superior_id.get().parse().ok(),
        };
        add_action.dispatch((draft, picture.get()));
    };

    let alert = Signal::derive(cx, move || {
        submit_error
            .get()
            .or_else(|| options.with(|options| options.error().map(str::to_owned)))
    });
    let no_users_note = move || {
        options
            .with(|options| matches!(options, RemoteResource::Empty))
            .then(|| view! { cx, <p class="form-note">{NO_USERS}</p> })
    };
    let user_options = move || {
        options
            .with(|options| options.ready().map(|o| o.users.clone()).unwrap_or_default())
            .into_iter()
            .map(|user| view! { cx, <option value=user.id.to_string()>{user.email}</option> })
            .collect::<Vec<_>>()
    };
    let superior_options = move || {
        options
            .with(|options| options.ready().map(|o| o.members.clone()).unwrap_or_default())
            .into_iter()
            .map(|member| view! { cx, <option value=member.id.to_string()>{member.name}</option> })
            .collect::<Vec<_>>()
    };
    let position_options = Position::ALL
        .into_iter()
        .map(|position| view! { cx, <option value=position.as_str()>{position.as_str()}</option> })
        .collect::<Vec<_>>();

    view! { cx,
        <NavBar/>
        <div class="page">
            <h1>"Add New Member"</h1>
            <ErrorAlert message=alert/>
            {no_users_note}
            <form class="card member-form" on:submit=on_submit>
                <div class="form-group">
                    <label for="name">"Name"</label>
                    <input
                        class="form-control"
                        type="text"
                        id="name"
                        required
                        prop:value=move || name.get()
                        on:input=move |ev| set_name.set(event_target_value(&ev))
                    />
                </div>
                <div class="form-group">
                    <label for="position">"Position"</label>
                    <select
                        class="form-control"
                        id="position"
                        required
                        on:change=move |ev| set_position.set(event_target_value(&ev))
                    >
                        <option value="">"Select Position"</option>
                        {position_options}
                    </select>
                </div>
                <div class="form-group">
                    <label for="user">"User"</label>
                    <select
                        class="form-control"
                        id="user"
                        required
                        on:change=move |ev| set_user_id.set(event_target_value(&ev))
                    >
                        <option value="">"Select User"</option>
                        {user_options}
                    </select>
                </div>
                <div class="form-group">
                    <label for="superior">"Superior"</label>
                    <select
                        class="form-control"
                        id="superior"
                        on:change=move |ev| set_superior_id.set(event_target_value(&ev))
                    >
                        <option value="">"Select Superior (Optional)"</option>
                        {superior_options}
                    </select>
                </div>
                <div class="form-group">
                    <label for="picture">"Profile Picture"</label>
                    <input
                        class="form-control"
                        type="file"
                        id="picture"
                        accept="image/*"
                        required
                        on:change=move |ev| {
                            let input = event_target::<HtmlInputElement>(&ev);
                            set_picture.set(input.files().and_then(|files| files.get(0)));
                        }
                    />
                </div>
                <button class="btn btn-primary" type="submit" prop:disabled=move || pending.get()>
                    {move || if pending.get() { "Adding..." } else { "Add Member" }}
                </button>
            </form>
            <A href=Page::Home.path()>"Back to members"</A>
        </div>
    }
}
