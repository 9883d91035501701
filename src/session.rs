use std::rc::Rc;

use tracing::info;
use yew::Reducible;

use crate::error::SessionError;
use crate::models::{LoginResponse, TransactionType, User};

const TOKEN_KEY: &str = "token";
const USER_KEY: &str = "user";

#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    pub token: String,
    pub user: User,
}

fn storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

impl Session {
    pub fn from_parts(token: Option<String>, user: Option<String>) -> Result<Self, SessionError> {
        let token = token
            .filter(|t| !t.is_empty())
            .ok_or(SessionError::MissingToken)?;
        let user = user.ok_or(SessionError::MissingUser)?;
        let user = serde_json::from_str::<User>(&user)?;
        Ok(Self { token, user })
    }

    /// Session left in localStorage by a previous login, if any.
    pub fn load() -> Result<Self, SessionError> {
        let (token, user) = match storage() {
            Some(storage) => (
                storage.get_item(TOKEN_KEY).ok().flatten(),
                storage.get_item(USER_KEY).ok().flatten(),
            ),
            None => (None, None),
        };
        Self::from_parts(token, user)
    }

    pub fn store(response: LoginResponse) -> Self {
        if let Some(storage) = storage() {
            let _ = storage.set_item(TOKEN_KEY, &response.token);
            if let Ok(raw) = serde_json::to_string(&response.user) {
                let _ = storage.set_item(USER_KEY, &raw);
            }
        }
        info!(user = %response.user.user_id, "session stored");
        Self {
            token: response.token,
            user: response.user,
        }
    }

    pub fn clear() {
        if let Some(storage) = storage() {
            let _ = storage.remove_item(TOKEN_KEY);
            let _ = storage.remove_item(USER_KEY);
        }
        info!("session cleared");
    }
}

/// List position, search and tab filter of the dashboard.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewState {
    pub page: u32,
    pub size: u32,
    pub search: String,
    pub transaction_type: TransactionType,
}

impl ViewState {
    pub fn new(size: u32) -> Self {
        Self {
            page: 0,
            size,
            search: String::new(),
            transaction_type: TransactionType::Received,
        }
    }

    pub fn search(&self, keyword: &str) -> Self {
        Self {
            page: 0,
            search: keyword.trim().to_string(),
            ..self.clone()
        }
    }

    pub fn filter_by_type(&self, transaction_type: TransactionType) -> Self {
        Self {
            page: 0,
            transaction_type,
            ..self.clone()
        }
    }

    pub fn go_to(&self, page: u32) -> Self {
        Self {
            page,
            ..self.clone()
        }
    }

    pub fn query(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("page", self.page.to_string()), ("size", self.size.to_string())];
        if !self.search.is_empty() {
            params.push(("search", self.search.clone()));
        }
        params.push(("transactionType", self.transaction_type.as_param().to_string()));
        params
    }
}

/// Changes to [`ViewState`]. Dispatched through a reducer so a late update,
/// such as a debounced search, applies on top of the newest state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewAction {
    Search(String),
    FilterByType(TransactionType),
    GoTo(u32),
}

impl Reducible for ViewState {
    type Action = ViewAction;

    fn reduce(self: Rc<Self>, action: ViewAction) -> Rc<Self> {
        let next = match action {
            ViewAction::Search(keyword) => self.search(&keyword),
            ViewAction::FilterByType(transaction_type) => self.filter_by_type(transaction_type),
            ViewAction::GoTo(page) => self.go_to(page),
        };
        if next == *self {
            self
        } else {
            Rc::new(next)
        }
    }
}

/// Bumped after every write so loaders refetch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Revision(pub u32);

impl Reducible for Revision {
    type Action = ();

    fn reduce(self: Rc<Self>, _: ()) -> Rc<Self> {
        Rc::new(Revision(self.0.wrapping_add(1)))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageLink {
    Previous(u32),
    Page { index: u32, active: bool },
    Next(u32),
}

/// Pagination links for `total_pages` pages; empty when one page or less.
pub fn page_links(current: u32, total_pages: u32) -> Vec<PageLink> {
    if total_pages <= 1 {
        return Vec::new();
    }
    let mut links = Vec::with_capacity(total_pages as usize + 2);
    if current > 0 {
        links.push(PageLink::Previous(current - 1));
    }
    links.extend((0..total_pages).map(|index| PageLink::Page {
        index,
        active: index == current,
    }));
    if current + 1 < total_pages {
        links.push(PageLink::Next(current + 1));
    }
    links
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn session_needs_token_and_user() {
        let user = r#"{"id":1,"userId":"gildong","email":null,"name":"Hong"}"#.to_string();
        assert!(matches!(
            Session::from_parts(None, Some(user.clone())),
            Err(SessionError::MissingToken)
        ));
        assert!(matches!(
            Session::from_parts(Some(String::new()), Some(user.clone())),
            Err(SessionError::MissingToken)
        ));
        assert!(matches!(
            Session::from_parts(Some("t".into()), None),
            Err(SessionError::MissingUser)
        ));
        assert!(matches!(
            Session::from_parts(Some("t".into()), Some("{".into())),
            Err(SessionError::InvalidUser(_))
        ));

        let session = Session::from_parts(Some("abc".into()), Some(user)).unwrap();
        assert_eq!(session.user.name, "Hong");
        assert_eq!(session.token, "abc");
    }

    #[test]
    fn search_and_filters_reset_the_page() {
        let view = ViewState::new(10).go_to(3);
        assert_eq!(view.search("  kim ").page, 0);
        assert_eq!(view.search("  kim ").search, "kim");
        let sent = view.filter_by_type(TransactionType::Sent);
        assert_eq!(sent.page, 0);
        assert_eq!(sent.transaction_type, TransactionType::Sent);
    }

    #[test]
    fn late_search_keeps_a_newer_tab_choice() {
        let start = Rc::new(ViewState::new(10));
        // The tab changes while a debounced search is still pending.
        let switched = start.reduce(ViewAction::FilterByType(TransactionType::Sent));
        let searched = switched.reduce(ViewAction::Search(" park ".into()));
        assert_eq!(searched.transaction_type, TransactionType::Sent);
        assert_eq!(searched.search, "park");
        assert_eq!(searched.page, 0);

        let paged = searched.reduce(ViewAction::GoTo(4));
        assert_eq!(paged.page, 4);
        assert_eq!(paged.search, "park");
    }

    #[test]
    fn unchanged_view_keeps_its_allocation() {
        let view = Rc::new(ViewState::new(10));
        let same = Rc::clone(&view).reduce(ViewAction::GoTo(0));
        assert!(Rc::ptr_eq(&view, &same));
    }

    #[test]
    fn revisions_count_up() {
        let revision = Rc::new(Revision::default()).reduce(()).reduce(());
        assert_eq!(*revision, Revision(2));
    }

    #[test]
    fn query_omits_empty_search() {
        let view = ViewState::new(10);
        assert_eq!(
            view.query(),
            vec![
                ("page", "0".to_string()),
                ("size", "10".to_string()),
                ("transactionType", "RECEIVED".to_string()),
            ]
        );
        let view = view.search("lee").go_to(2);
        assert_eq!(view.query()[2], ("search", "lee".to_string()));
        assert_eq!(view.query()[0], ("page", "2".to_string()));
    }

    #[test]
    fn no_links_for_a_single_page() {
        assert!(page_links(0, 0).is_empty());
        assert!(page_links(0, 1).is_empty());
    }

    #[test]
    fn links_around_the_current_page() {
        assert_eq!(
            page_links(1, 3),
            vec![
                PageLink::Previous(0),
                PageLink::Page { index: 0, active: false },
                PageLink::Page { index: 1, active: true },
                PageLink::Page { index: 2, active: false },
                PageLink::Next(2),
            ]
        );
        let first = page_links(0, 2);
        assert_eq!(first.first(), Some(&PageLink::Page { index: 0, active: true }));
        assert_eq!(first.last(), Some(&PageLink::Next(1)));
        let last = page_links(1, 2);
        assert_eq!(last.last(), Some(&PageLink::Page { index: 1, active: true }));
    }
}
