//! The standard suite against the posts service.
//!
//! | case | request | token | expects |
//! |---|---|---|---|
//! | `register` | `POST /api/user/register` | - | 200 |
//! | `login` | `POST /api/user/login` | - | 200 |
//! | `create_post` | `POST /api/post` | tertiary | 201 |
//! | `list_posts` | `GET /api/posts` | tertiary | 200 |
//! | `get_post` | `POST /api/post` | primary | 200 |
//! | `like_post` | `PUT /api/post/like` | primary | 200 |
//! | `comment_post` | `PUT /api/post/comment` | primary | not sent |

use serde_json::json;

use crate::case::{TestCase, TokenSlot, object};
use crate::fixture::Fixture;
use crate::request::HttpMethod;

/// Case names in run order.
pub const CASE_NAMES: [&str; 7] = [
    "register",
    "login",
    "create_post",
    "list_posts",
    "get_post",
    "like_post",
    "comment_post",
];

/// Builds the standard suite from the fixture's payload data.
#[must_use]
pub fn standard_suite(fixture: &Fixture) -> Vec<TestCase> {
    let ids = &fixture.ids;

    vec![
        TestCase::new("register", HttpMethod::Post, "/api/user/register", 200).with_body(object([
            ("username", json!(fixture.register.username)),
            ("email", json!(fixture.register.email)),
            ("password", json!(fixture.register.password)),
        ])),
        TestCase::new("login", HttpMethod::Post, "/api/user/login", 200).with_body(object([
            ("email", json!(fixture.login.email)),
            ("password", json!(fixture.login.password)),
        ])),
        TestCase::new("create_post", HttpMethod::Post, "/api/post", 201)
            .with_token(TokenSlot::Tertiary)
            .with_body(object([
                ("postTitle", json!(fixture.post.title)),
                ("postDescription", json!(fixture.post.description)),
                ("postOwner", json!(ids.owner_id)),
            ])),
        TestCase::new("list_posts", HttpMethod::Get, "/api/posts", 200)
            .with_token(TokenSlot::Tertiary),
        // Fetching a single post goes through POST with the id in the body.
        TestCase::new("get_post", HttpMethod::Post, "/api/post", 200)
            .with_token(TokenSlot::Primary)
            .with_body(object([("postId", json!(ids.post_id))])),
        TestCase::new("like_post", HttpMethod::Put, "/api/post/like", 200)
            .with_token(TokenSlot::Primary)
            .with_body(object([
                ("postId", json!(ids.post_id)),
                ("userId", json!(ids.user_id)),
                ("likeAdd", json!(true)),
                ("likeRemove", json!(false)),
            ])),
        TestCase::not_implemented(
            "comment_post",
            HttpMethod::Put,
            "/api/post/comment",
            "expected status for comment creation is undocumented",
        )
        .with_token(TokenSlot::Primary)
        .with_body(object([
            ("postId", json!(ids.post_id)),
            ("userId", json!(ids.user_id)),
            ("comment", json!(fixture.comment)),
        ])),
    ]
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::case::Expectation;
    use crate::response::StatusCode;
    use pretty_assertions::assert_eq;
    use serde_json::Value;

    fn find<'a>(suite: &'a [TestCase], name: &str) -> &'a TestCase {
        suite.iter().find(|c| c.name == name).unwrap()
    }

    fn body(case: &TestCase) -> Value {
        serde_json::to_value(case.body.as_ref().unwrap()).unwrap()
    }

    #[test]
    fn test_suite_order_matches_case_names() {
        let suite = standard_suite(&Fixture::default());
        let names: Vec<_> = suite.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, CASE_NAMES);
    }

    #[test]
    fn test_expected_statuses() {
        let suite = standard_suite(&Fixture::default());
        let expected: Vec<_> = suite.iter().map(TestCase::expected_status).collect();
        assert_eq!(
            expected,
            vec![
                Some(StatusCode::new(200)),
                Some(StatusCode::new(200)),
                Some(StatusCode::new(201)),
                Some(StatusCode::new(200)),
                Some(StatusCode::new(200)),
                Some(StatusCode::new(200)),
                None,
            ]
        );
    }

    #[test]
    fn test_register_body_has_exact_fields() {
        let suite = standard_suite(&Fixture::default());
        let case = find(&suite, "register");
        assert_eq!(case.token, None);
        assert_eq!(
            body(case),
            json!({"username": "Tommy", "email": "tommy@abc.com", "password": "1231234"})
        );
    }

    #[test]
    fn test_login_body_has_exact_fields() {
        let suite = standard_suite(&Fixture::default());
        assert_eq!(
            body(find(&suite, "login")),
            json!({"email": "saeed@abc.com", "password": "1231234"})
        );
    }

    #[test]
    fn test_create_post_uses_owner() {
        let suite = standard_suite(&Fixture::default());
        let case = find(&suite, "create_post");
        assert_eq!(case.token, Some(TokenSlot::Tertiary));
        assert_eq!(
            body(case),
            json!({
                "postTitle": "hello hello",
                "postDescription": "This is a test post",
                "postOwner": "65f6f4cc925b23ebf5a95549"
            })
        );
    }

    #[test]
    fn test_list_posts_has_no_body() {
        let suite = standard_suite(&Fixture::default());
        let case = find(&suite, "list_posts");
        assert_eq!(case.method, HttpMethod::Get);
        assert!(case.body.is_none());
        assert_eq!(case.token, Some(TokenSlot::Tertiary));
    }

    #[test]
    fn test_like_post_body() {
        let suite = standard_suite(&Fixture::default());
        let case = find(&suite, "like_post");
        assert_eq!(case.method, HttpMethod::Put);
        assert_eq!(case.path, "/api/post/like");
        assert_eq!(
            body(case),
            json!({
                "postId": "660703055d481adc9ba549bd",
                "userId": "65f6fbb0603f3dfd5dcb1131",
                "likeAdd": true,
                "likeRemove": false
            })
        );
    }

    #[test]
    fn test_comment_post_is_not_implemented() {
        let suite = standard_suite(&Fixture::default());
        let case = find(&suite, "comment_post");
        assert!(matches!(
            case.expectation,
            Expectation::NotImplemented { .. }
        ));
        assert_eq!(
            body(case),
            json!({
                "postId": "660703055d481adc9ba549bd",
                "userId": "65f6fbb0603f3dfd5dcb1131",
                "comment": "This is a test comment"
            })
        );
    }

    #[test]
    fn test_payload_follows_fixture() {
        let mut fixture = Fixture::default();
        fixture.ids.post_id = "p-42".to_string();
        let suite = standard_suite(&fixture);
        assert_eq!(body(find(&suite, "get_post")), json!({"postId": "p-42"}));
    }
}
