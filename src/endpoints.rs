//! Endpoint table for the Docmost API.
//!
//! Every command maps to exactly one `POST` endpoint. An [`Endpoint`] records
//! the path, how the request body is encoded, which keys may hold the rows of
//! a listing response, and the columns shown when a listing is rendered as a
//! table.

/// Request body encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// `application/x-www-form-urlencoded`, for flat scalar fields.
    Form,
    /// `application/json`, for lists, booleans and explicit nulls.
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    pub path: &'static str,
    pub encoding: Encoding,
    pub collection_keys: &'static [&'static str],
    pub columns: &'static [&'static str],
}

impl Endpoint {
    const fn form(path: &'static str) -> Self {
        Self {
            path,
            encoding: Encoding::Form,
            collection_keys: &[],
            columns: &[],
        }
    }

    const fn json(path: &'static str) -> Self {
        Self {
            path,
            encoding: Encoding::Json,
            collection_keys: &[],
            columns: &[],
        }
    }

    const fn listing(
        self,
        collection_keys: &'static [&'static str],
        columns: &'static [&'static str],
    ) -> Self {
        Self {
            collection_keys,
            columns,
            ..self
        }
    }

    pub fn is_listing(&self) -> bool {
        !self.collection_keys.is_empty()
    }

    /// Table columns, or `None` when every key of the first row is shown.
    pub fn table_columns(&self) -> Option<&'static [&'static str]> {
        if self.columns.is_empty() {
            None
        } else {
            Some(self.columns)
        }
    }
}

// Authentication
pub const AUTH_LOGIN: Endpoint = Endpoint::form("/auth/login");

// Spaces
pub const SPACES_LIST: Endpoint =
    Endpoint::form("/spaces").listing(&["items", "spaces"], &["id", "name", "slug", "description"]);
pub const SPACES_INFO: Endpoint = Endpoint::form("/spaces/info");
pub const SPACES_CREATE: Endpoint = Endpoint::form("/spaces/create");
pub const SPACES_UPDATE: Endpoint = Endpoint::form("/spaces/update");
pub const SPACES_DELETE: Endpoint = Endpoint::form("/spaces/delete");
pub const SPACES_MEMBERS: Endpoint = Endpoint::form("/spaces/members")
    .listing(&["items", "members"], &["id", "name", "email", "role"]);
pub const SPACES_MEMBERS_ADD: Endpoint = Endpoint::json("/spaces/members/add");
pub const SPACES_MEMBERS_REMOVE: Endpoint = Endpoint::form("/spaces/members/remove");
pub const SPACES_MEMBERS_CHANGE_ROLE: Endpoint = Endpoint::form("/spaces/members/change-role");

// Pages
pub const PAGES_CREATE: Endpoint = Endpoint::form("/pages/create");
pub const PAGES_IMPORT: Endpoint = Endpoint::form("/pages/import");
pub const PAGES_INFO: Endpoint = Endpoint::form("/pages/info");
pub const PAGES_UPDATE: Endpoint = Endpoint::form("/pages/update");
pub const PAGES_DELETE: Endpoint = Endpoint::form("/pages/delete");
pub const PAGES_MOVE: Endpoint = Endpoint::json("/pages/move");
pub const PAGES_TREE: Endpoint = Endpoint::form("/pages/sidebar-pages")
    .listing(&["items", "pages"], &["id", "title", "icon", "parentPageId"]);
pub const PAGES_RECENT: Endpoint = Endpoint::form("/pages/recent")
    .listing(&["items", "pages"], &["id", "title", "spaceId", "updatedAt"]);
pub const PAGES_EXPORT: Endpoint = Endpoint::form("/pages/export");
pub const PAGES_HISTORY: Endpoint = Endpoint::form("/pages/history")
    .listing(&["items", "history"], &["id", "version", "createdAt", "creatorId"]);
pub const PAGES_HISTORY_INFO: Endpoint = Endpoint::form("/pages/history/info");
pub const PAGES_BREADCRUMBS: Endpoint = Endpoint::form("/pages/breadcrumbs")
    .listing(&["items", "breadcrumbs"], &["id", "title", "icon"]);

// Users
pub const USERS_ME: Endpoint = Endpoint::form("/users/me");
pub const USERS_UPDATE: Endpoint = Endpoint::form("/users/update");

// Workspace
pub const WORKSPACE_INFO: Endpoint = Endpoint::form("/workspace/info");
pub const WORKSPACE_UPDATE: Endpoint = Endpoint::form("/workspace/update");
pub const WORKSPACE_MEMBERS: Endpoint = Endpoint::form("/workspace/members")
    .listing(&["items", "members"], &["id", "name", "email", "role"]);
pub const WORKSPACE_INVITATIONS_LIST: Endpoint = Endpoint::form("/workspace/invitations/list")
    .listing(&["items", "invitations"], &["id", "email", "role", "createdAt"]);
pub const WORKSPACE_INVITATIONS_CREATE: Endpoint = Endpoint::json("/workspace/invitations/create");
pub const WORKSPACE_INVITATIONS_REVOKE: Endpoint = Endpoint::form("/workspace/invitations/revoke");

// Groups
pub const GROUPS_LIST: Endpoint = Endpoint::form("/groups/list")
    .listing(&["items", "groups"], &["id", "name", "description", "memberCount"]);
pub const GROUPS_INFO: Endpoint = Endpoint::form("/groups/info");
pub const GROUPS_CREATE: Endpoint = Endpoint::form("/groups/create");
pub const GROUPS_UPDATE: Endpoint = Endpoint::form("/groups/update");
pub const GROUPS_DELETE: Endpoint = Endpoint::form("/groups/delete");
pub const GROUPS_MEMBERS: Endpoint =
    Endpoint::form("/groups/members").listing(&["items", "members"], &["id", "name", "email"]);
pub const GROUPS_MEMBERS_ADD: Endpoint = Endpoint::json("/groups/members/add");
pub const GROUPS_MEMBERS_REMOVE: Endpoint = Endpoint::form("/groups/members/remove");

// Comments
pub const COMMENTS_LIST: Endpoint = Endpoint::form("/comments/list").listing(
    &["items", "comments"],
    &["id", "content", "creatorId", "resolved", "createdAt"],
);
pub const COMMENTS_CREATE: Endpoint = Endpoint::form("/comments/create");
pub const COMMENTS_UPDATE: Endpoint = Endpoint::form("/comments/update");
pub const COMMENTS_RESOLVE: Endpoint = Endpoint::json("/comments/resolve");
pub const COMMENTS_DELETE: Endpoint = Endpoint::form("/comments/delete");

// Search
pub const SEARCH: Endpoint = Endpoint::json("/search")
    .listing(&["items", "results"], &["id", "title", "spaceId", "highlight"]);
pub const SEARCH_SUGGEST: Endpoint =
    Endpoint::json("/search/suggest").listing(&["items", "suggestions"], &["id", "title", "type"]);
