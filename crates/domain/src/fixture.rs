//! Fixture state shared by every case in a run.
//!
//! The fixture is resolved once before the run starts and is read-only
//! afterwards. Ids refer to records that must already exist in the target
//! service; nothing here creates them.

use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::case::TokenSlot;
use crate::error::{DomainError, DomainResult};

/// Base URL used when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Everything a run needs to know about the service under test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Fixture {
    /// Base URL of the service, e.g. `http://localhost:3000`.
    pub base_url: String,
    /// Pre-issued bearer tokens.
    pub tokens: BearerTokens,
    /// Ids of records assumed to exist in the service.
    pub ids: FixtureIds,
    /// Account created by the registration case.
    pub register: NewAccount,
    /// Existing account used by the login case.
    pub login: LoginAccount,
    /// Post created by the create-post case.
    pub post: SamplePost,
    /// Text of the comment case.
    pub comment: String,
}

impl Fixture {
    /// Parses and checks the base URL.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidUrl` if the URL does not parse or is not
    /// `http`/`https`.
    pub fn base_url(&self) -> DomainResult<Url> {
        let url = Url::parse(&self.base_url)
            .map_err(|e| DomainError::InvalidUrl(format!("{e}: {}", self.base_url)))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(DomainError::InvalidUrl(format!(
                "base URL must start with http:// or https://: {}",
                self.base_url
            )));
        }

        Ok(url)
    }

    /// Appends a case path such as `/api/posts` to the base URL.
    ///
    /// A path on the base URL is kept as a prefix, so `http://gw/posts-svc`
    /// and `http://gw/posts-svc/` both give `http://gw/posts-svc/api/posts`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidUrl` if the base URL is invalid.
    pub fn endpoint(&self, path: &str) -> DomainResult<Url> {
        let mut url = self.base_url()?;
        let joined = format!(
            "{}/{}",
            url.path().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        url.set_path(&joined);
        Ok(url)
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            tokens: BearerTokens::default(),
            ids: FixtureIds::default(),
            register: NewAccount::default(),
            login: LoginAccount::default(),
            post: SamplePost::default(),
            comment: "This is a test comment".to_string(),
        }
    }
}

/// The three pre-issued bearer tokens.
///
/// Tokens are opaque; they are never parsed, renewed or checked for expiry.
/// A blank string counts as not configured. Anything else is sent exactly as
/// configured.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BearerTokens {
    /// Token of the user who likes and comments on the fixture post.
    pub primary: Option<String>,
    /// Spare token; configured for completeness, no case uses it.
    pub secondary: Option<String>,
    /// Token of the fixture post owner.
    pub tertiary: Option<String>,
}

impl BearerTokens {
    /// Returns the token in the given slot, if configured.
    #[must_use]
    pub fn get(&self, slot: TokenSlot) -> Option<&str> {
        let token = match slot {
            TokenSlot::Primary => self.primary.as_deref(),
            TokenSlot::Secondary => self.secondary.as_deref(),
            TokenSlot::Tertiary => self.tertiary.as_deref(),
        };
        token.filter(|t| !t.trim().is_empty())
    }
}

// Tokens are credentials and must not end up in logs.
impl fmt::Debug for BearerTokens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let show = |slot| self.get(slot).map(|_| "<redacted>");
        f.debug_struct("BearerTokens")
            .field("primary", &show(TokenSlot::Primary))
            .field("secondary", &show(TokenSlot::Secondary))
            .field("tertiary", &show(TokenSlot::Tertiary))
            .finish()
    }
}

/// Ids of records the suite assumes already exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FixtureIds {
    /// Existing post that is fetched, liked and commented on.
    pub post_id: String,
    /// User who likes and comments; must not own `post_id`.
    pub user_id: String,
    /// Owner of newly created posts; matches the tertiary token.
    pub owner_id: String,
}

impl Default for FixtureIds {
    fn default() -> Self {
        Self {
            post_id: "660703055d481adc9ba549bd".to_string(),
            user_id: "65f6fbb0603f3dfd5dcb1131".to_string(),
            owner_id: "65f6f4cc925b23ebf5a95549".to_string(),
        }
    }
}

/// Registration payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewAccount {
    /// Display name.
    pub username: String,
    /// Email address; must be unused in the service.
    pub email: String,
    /// Password.
    pub password: String,
}

impl Default for NewAccount {
    fn default() -> Self {
        Self {
            username: "Tommy".to_string(),
            email: "tommy@abc.com".to_string(),
            password: "1231234".to_string(),
        }
    }
}

/// Login payload for an account that already exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginAccount {
    /// Email address.
    pub email: String,
    /// Password.
    pub password: String,
}

impl Default for LoginAccount {
    fn default() -> Self {
        Self {
            email: "saeed@abc.com".to_string(),
            password: "1231234".to_string(),
        }
    }
}

/// Title and description of the post the suite creates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplePost {
    /// Post title.
    pub title: String,
    /// Post description.
    pub description: String,
}

impl Default for SamplePost {
    fn default() -> Self {
        Self {
            title: "hello hello".to_string(),
            description: "This is a test post".to_string(),
        }
    }
}
