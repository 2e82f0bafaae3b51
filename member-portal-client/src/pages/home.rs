use leptos::*;
use leptos_router::*;
use member_portal_common::Member;

use crate::{
    api::{AuthorizedApi, MembersApi},
    components::{
        nav::NavBar,
        status::{SkeletonGrid, StatusPanel},
    },
    pages::{member_path, Page},
    resource::RemoteResource,
    scope::ScreenScope,
};

pub const FETCH_ERROR: &str = "Failed to fetch members. You need to login first.";
pub const NO_MEMBERS: &str = "No members available at the moment.";
const SKELETON_CARDS: usize = 4;

pub async fn load_members<A>(api: &A) -> RemoteResource<Vec<Member>>
where
    A: MembersApi + ?Sized,
{
    RemoteResource::from_result(api.members().await, FETCH_ERROR)
}

#[component]
fn MemberCard(cx: Scope, member: Member) -> impl IntoView {
    view! { cx,
        <div class="card member-card">
            <h5>{member.name}</h5>
            <p class="member-email">{member.user.email}</p>
            <p class="member-position">{member.position.as_str()}</p>
            <A href=member_path(member.id)>"Detail"</A>
        </div>
    }
}

#[component]
pub fn Home(cx: Scope, api: AuthorizedApi) -> impl IntoView {
    let scope = ScreenScope::new(cx);
    let api = api.scoped(&scope);
    let (members, set_members) = create_signal(cx, RemoteResource::<Vec<Member>>::Loading);

    spawn_local(async move {
        if let Some(state) = scope.run(load_members(&api)).await {
            set_members.set(state);
        }
    });

    view! { cx,
        <NavBar/>
        <div class="page">
            <div class="card page-header">
                <h1>"Management Application"</h1>
                <A href=Page::AddMember.path()>"Add Member"</A>
            </div>
            {move || match members.get() {
                RemoteResource::Loading => view! { cx, <SkeletonGrid count=SKELETON_CARDS/> }
                    .into_view(cx),
                RemoteResource::Error(message) => view! { cx, <StatusPanel message=message/> }
                    .into_view(cx),
                RemoteResource::Empty => view! { cx, <StatusPanel message=NO_MEMBERS/> }
                    .into_view(cx),
                RemoteResource::Ready(members) => {
                    let cards = members
                        .into_iter()
                        .map(|member| view! { cx, <MemberCard member=member/> })
                        .collect::<Vec<_>>();
                    view! { cx, <div class="card-grid">{cards}</div> }.into_view(cx)
                }
            }}
        </div>
    }
}

#[cfg(test)]
mod test {
    use member_portal_common::Member;
    use rstest::rstest;

    use super::*;
    use crate::pages::test::{alice, bob, server_error, FakeMembersApi};

    #[tokio::test]
    async fn empty_collection_should_render_empty_state() {
        let api = FakeMembersApi::default().with_members(Ok(vec![]));

        let state = load_members(&api).await;

        assert_eq!(state, RemoteResource::Empty);
        assert_eq!(state.error(), None);
    }

    #[tokio::test]
    async fn failed_fetch_should_render_error_not_skeleton() {
        let api = FakeMembersApi::default().with_members(Err(server_error()));

        let state = load_members(&api).await;

        assert_eq!(state.error(), Some(FETCH_ERROR));
        assert!(!state.is_loading());
    }

    #[tokio::test]
    async fn missing_token_should_render_login_hint() {
        let api = FakeMembersApi::default().with_members(Err(crate::api::Error::MissingToken));

        let state = load_members(&api).await;

        assert_eq!(state, RemoteResource::Error(FETCH_ERROR.to_owned()));
    }

    #[rstest]
    #[tokio::test]
    async fn members_should_render_cards(alice: Member, bob: Member) {
        let api = FakeMembersApi::default().with_members(Ok(vec![alice.clone(), bob.clone()]));

        let state = load_members(&api).await;

        assert_eq!(state.ready(), Some(&vec![alice, bob]));
        assert_eq!(*api.calls.borrow(), vec!["members"]);
    }
}
