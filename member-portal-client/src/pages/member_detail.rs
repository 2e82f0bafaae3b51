use chrono::{DateTime, Local, NaiveDateTime};
use leptos::*;
use leptos_router::*;
use member_portal_common::{Member, MemberId};

use crate::{
    api::{AuthorizedApi, MembersApi},
    components::{
        display_option,
        nav::NavBar,
        status::{SkeletonCard, StatusPanel},
    },
    resource::RemoteResource,
    scope::ScreenScope,
};

pub const FETCH_ERROR: &str = "Failed to fetch member details. You need to login first.";
pub const NOT_FOUND: &str = "Member not found.";
pub const NO_SUPERIOR: &str = "No superior assigned";
const JOINED_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

/// Fetch the member named by the route. An id that is not a number can never match a member.
pub async fn load_member<A>(api: &A, id: Option<MemberId>) -> RemoteResource<Member>
where
    A: MembersApi + ?Sized,
{
    let Some(id) = id else {
        return RemoteResource::Empty;
    };
    RemoteResource::from_optional(api.member(id).await, FETCH_ERROR)
}

/// Member id named by the route. An id that is not a number yields [None].
fn member_id_param(params: &ParamsMap) -> Option<MemberId> {
    params.get("id").and_then(|id| id.parse().ok())
}

/// Creation timestamp in local time. Timestamps with an offset are converted, naive ones are
/// assumed to be local already. Anything else is shown as received.
pub fn format_joined(created_at: Option<&str>) -> String {
    let Some(created_at) = created_at else {
        return display_option(None::<&str>);
    };
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(created_at) {
        return timestamp
            .with_timezone(&Local)
            .format(JOINED_FORMAT)
            .to_string();
    }
    match created_at.parse::<NaiveDateTime>() {
        Ok(timestamp) => timestamp.format(JOINED_FORMAT).to_string(),
        Err(_) => created_at.to_owned(),
    }
}

/// Values displayed in the member detail table
#[derive(Debug, PartialEq, Eq)]
pub struct MemberDetails {
    pub name: String,
    pub email: String,
    pub position: &'static str,
    pub joined: String,
    pub superior: String,
    pub picture_url: String,
}

impl From<&Member> for MemberDetails {
    fn from(member: &Member) -> Self {
        Self {
            name: member.name.clone(),
            email: member.user.email.clone(),
            position: member.position.as_str(),
            joined: format_joined(member.created_at.as_deref()),
            superior: member
                .superior_name()
                .unwrap_or(NO_SUPERIOR)
                .to_owned(),
            picture_url: member.picture_url.clone().unwrap_or_default(),
        }
    }
}

#[component]
fn DetailRow(cx: Scope, label: &'static str, value: String) -> impl IntoView {
    view! { cx,
        <tr>
            <td class="detail-label">{label}</td>
            <td>{value}</td>
        </tr>
    }
}

#[component]
fn MemberDetailCard(cx: Scope, details: MemberDetails) -> impl IntoView {
    view! { cx,
        <div class="card member-detail">
            <div class="member-picture">
                <img src=details.picture_url alt=details.name.clone()/>
            </div>
            <table>
                <tbody>
                    <DetailRow label="Name:" value=details.name/>
                    <DetailRow label="Email:" value=details.email/>
                    <DetailRow label="Position:" value=details.position.to_owned()/>
                    <DetailRow label="Join from:" value=details.joined/>
                    <DetailRow label="Superior:" value=details.superior/>
                </tbody>
            </table>
        </div>
    }
}

#[component]
pub fn MemberDetail(cx: Scope, api: AuthorizedApi) -> impl IntoView {
    let scope = ScreenScope::new(cx);
    let api = api.scoped(&scope);
    let params = use_params_map(cx);
    let id = create_memo(cx, move |_| params.with(member_id_param));
    let (member, set_member) = create_signal(cx, RemoteResource::<Member>::Loading);

    create_effect(cx, move |_| {
        let requested = id.get();
        set_member.set(RemoteResource::Loading);
        let api = api.clone();
        let scope = scope.clone();
        spawn_local(async move {
            let Some(state) = scope.run(load_member(&api, requested)).await else {
                return;
            };
            // a newer id may have been routed while this one was loading
            if id.get_untracked() == requested {
                set_member.set(state);
            }
        });
    });

    view! { cx,
        <NavBar/>
        <div class="page">
            {move || match member.get() {
                RemoteResource::Loading => view! { cx, <SkeletonCard lines=4/> }.into_view(cx),
                RemoteResource::Error(message) => view! { cx, <StatusPanel message=message/> }
                    .into_view(cx),
                RemoteResource::Empty => view! { cx, <StatusPanel message=NOT_FOUND/> }
                    .into_view(cx),
                RemoteResource::Ready(member) => {
                    view! { cx, <MemberDetailCard details=MemberDetails::from(&member)/> }
                        .into_view(cx)
                }
            }}
        </div>
    }
}

#[cfg(test)]
mod test {
    use chrono::{DateTime, Local};
    use member_portal_common::{Member, MemberId};
    use rstest::rstest;

    use super::*;
    use crate::pages::test::{alice, bob, server_error, FakeMembersApi};

    #[rstest]
    #[tokio::test]
    async fn found_member_should_render_details(bob: Member) {
        let api = FakeMembersApi::default().with_member(Ok(Some(bob)));

        let state = load_member(&api, Some(MemberId::new(2))).await;
        let details = state.ready().map(MemberDetails::from);

        assert_eq!(
            details,
            Some(MemberDetails {
                name: "Bob".to_owned(),
                email: "bob@example.com".to_owned(),
                position: "Developer",
                joined: "6/12/2024, 2:05:09 PM".to_owned(),
                superior: "Alice".to_owned(),
                picture_url: "http://localhost:8080/uploads/bob.png".to_owned(),
            })
        );
    }

    #[rstest]
    #[case(Some("2"), Some(MemberId::new(2)))]
    #[case(Some(" 17 "), Some(MemberId::new(17)))]
    #[case(Some("abc"), None)]
    #[case(None, None)]
    fn route_id_should_parse_as_member_id(
        #[case] raw: Option<&str>,
        #[case] expected: Option<MemberId>,
    ) {
        let mut params = ParamsMap::new();
        if let Some(raw) = raw {
            params.insert("id".to_owned(), raw.to_owned());
        }

        assert_eq!(member_id_param(&params), expected);
    }

    #[rstest]
    fn member_without_superior_should_use_fallback(alice: Member) {
        let details = MemberDetails::from(&alice);

        assert_eq!(details.superior, NO_SUPERIOR);
        assert_eq!(details.joined, "5/1/2024, 8:30:00 AM");
    }

    #[tokio::test]
    async fn missing_member_should_render_not_found() {
        let api = FakeMembersApi::default().with_member(Ok(None));

        let state = load_member(&api, Some(MemberId::new(99))).await;

        assert_eq!(state, RemoteResource::Empty);
    }

    #[tokio::test]
    async fn non_numeric_id_should_render_not_found_without_request() {
        let api = FakeMembersApi::default();

        let state = load_member(&api, None).await;

        assert_eq!(state, RemoteResource::Empty);
        assert!(api.calls.borrow().is_empty());
    }

    #[tokio::test]
    async fn failed_fetch_should_render_error() {
        let api = FakeMembersApi::default().with_member(Err(server_error()));

        let state = load_member(&api, Some(MemberId::new(2))).await;

        assert_eq!(state.error(), Some(FETCH_ERROR));
    }

    #[rstest]
    #[case(None, "-")]
    #[case(Some("2024-06-12T14:05:09"), "6/12/2024, 2:05:09 PM")]
    #[case(Some("2024-01-03T00:07:00.5"), "1/3/2024, 12:07:00 AM")]
    #[case(Some("last tuesday"), "last tuesday")]
    fn format_joined_cases(#[case] input: Option<&str>, #[case] expected: &str) {
        assert_eq!(format_joined(input), expected);
    }

    #[test]
    fn format_joined_should_convert_offset_timestamps_to_local() {
        let input = "2024-06-12T14:05:09Z";
        let expected = DateTime::parse_from_rfc3339(input)
            .expect("valid timestamp")
            .with_timezone(&Local)
            .format("%-m/%-d/%Y, %-I:%M:%S %p")
            .to_string();

        assert_eq!(format_joined(Some(input)), expected);
    }
}
