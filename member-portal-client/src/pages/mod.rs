pub mod add_member;
pub mod home;
pub mod login;
pub mod member_detail;
pub mod register;

use member_portal_common::MemberId;

/// Routed screens of the portal
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Page {
    Home,
    Login,
    Register,
    MemberDetail,
    AddMember,
}

impl Page {
    pub const fn path(&self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Login => "/login",
            Self::Register => "/register",
            Self::MemberDetail => "/members/:id",
            Self::AddMember => "/add-member",
        }
    }
}

pub fn member_path(id: MemberId) -> String {
    format!("/members/{id}")
}

#[cfg(test)]
pub(crate) mod test {
    use std::cell::RefCell;

    use async_trait::async_trait;
    use member_portal_common::{
        Credentials, LoginResponse, Member, MemberId, NewMember, Position, User, UserId,
    };
    use rstest::fixture;

    use crate::api::{self, AuthApi, MembersApi, Picture};

    fn reply<T>(slot: &RefCell<Option<api::Result<T>>>, name: &str) -> api::Result<T> {
        slot.borrow_mut()
            .take()
            .unwrap_or_else(|| panic!("unexpected call to {name}"))
    }

    /// Auth endpoints answering with canned replies, each usable once
    #[derive(Default)]
    pub(crate) struct FakeAuthApi {
        login: RefCell<Option<api::Result<LoginResponse>>>,
        register: RefCell<Option<api::Result<()>>>,
        pub(crate) calls: RefCell<Vec<String>>,
    }

    impl FakeAuthApi {
        pub(crate) fn with_login(self, reply: api::Result<LoginResponse>) -> Self {
            *self.login.borrow_mut() = Some(reply);
            self
        }

        pub(crate) fn with_register(self, reply: api::Result<()>) -> Self {
            *self.register.borrow_mut() = Some(reply);
            self
        }

        pub(crate) fn call_count(&self) -> usize {
            self.calls.borrow().len()
        }
    }

    #[async_trait(?Send)]
    impl AuthApi for FakeAuthApi {
        async fn login(&self, credentials: &Credentials) -> api::Result<LoginResponse> {
            self.calls
                .borrow_mut()
                .push(format!("login {}", credentials.email));
            reply(&self.login, "login")
        }

        async fn register(&self, credentials: &Credentials) -> api::Result<()> {
            self.calls
                .borrow_mut()
                .push(format!("register {}", credentials.email));
            reply(&self.register, "register")
        }
    }

    /// Member endpoints answering with canned replies, each usable once
    #[derive(Default)]
    pub(crate) struct FakeMembersApi {
        members: RefCell<Option<api::Result<Vec<Member>>>>,
        member: RefCell<Option<api::Result<Option<Member>>>>,
        users: RefCell<Option<api::Result<Vec<User>>>>,
        create: RefCell<Option<api::Result<()>>>,
        pub(crate) calls: RefCell<Vec<&'static str>>,
        pub(crate) created: RefCell<Vec<(NewMember, Picture)>>,
    }

    impl FakeMembersApi {
        pub(crate) fn with_members(self, reply: api::Result<Vec<Member>>) -> Self {
            *self.members.borrow_mut() = Some(reply);
            self
        }

        pub(crate) fn with_member(self, reply: api::Result<Option<Member>>) -> Self {
            *self.member.borrow_mut() = Some(reply);
            self
        }

        pub(crate) fn with_users(self, reply: api::Result<Vec<User>>) -> Self {
            *self.users.borrow_mut() = Some(reply);
            self
        }

        pub(crate) fn with_create(self, reply: api::Result<()>) -> Self {
            *self.create.borrow_mut() = Some(reply);
            self
        }
    }

    #[async_trait(?Send)]
    impl MembersApi for FakeMembersApi {
        async fn members(&self) -> api::Result<Vec<Member>> {
            self.calls.borrow_mut().push("members");
            reply(&self.members, "members")
        }

        async fn member(&self, _id: MemberId) -> api::Result<Option<Member>> {
            self.calls.borrow_mut().push("member");
            reply(&self.member, "member")
        }

        async fn users_not_in_members(&self) -> api::Result<Vec<User>> {
            self.calls.borrow_mut().push("users_not_in_members");
            reply(&self.users, "users_not_in_members")
        }

        async fn create_member(&self, member: &NewMember, picture: &Picture) -> api::Result<()> {
            self.calls.borrow_mut().push("create_member");
            self.created
                .borrow_mut()
                .push((member.clone(), picture.clone()));
            reply(&self.create, "create_member")
        }
    }

    pub(crate) fn server_error() -> api::Error {
        api::Error::Status {
            status: 500,
            message: "Internal Server Error".to_owned(),
        }
    }

    pub(crate) fn user(id: i64, email: &str) -> User {
        User {
            id: UserId::new(id),
            email: email.to_owned(),
        }
    }

    #[fixture]
    pub(crate) fn alice() -> Member {
        Member {
            id: MemberId::new(1),
            name: "Alice".to_owned(),
            position: Position::Manager,
            user: user(3, "alice@example.com"),
            superior: None,
            picture_url: Some("http://localhost:8080/uploads/alice.png".to_owned()),
            created_at: Some("2024-05-01T08:30:00".to_owned()),
        }
    }

    #[fixture]
    pub(crate) fn bob(alice: Member) -> Member {
        Member {
            id: MemberId::new(2),
            name: "Bob".to_owned(),
            position: Position::Developer,
            user: user(7, "bob@example.com"),
            superior: Some(Box::new(alice)),
            picture_url: Some("http://localhost:8080/uploads/bob.png".to_owned()),
            created_at: Some("2024-06-12T14:05:09.123".to_owned()),
        }
    }

    #[fixture]
    pub(crate) fn picture() -> Picture {
        Picture {
            file_name: "dave.png".to_owned(),
            content_type: "image/png".to_owned(),
            bytes: vec![0x89, b'P', b'N', b'G'],
        }
    }
}
