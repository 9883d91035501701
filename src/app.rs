use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use tracing::{info, warn};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::api::ApiClient;
use crate::components::layout::{Layout, Page};
use crate::components::{Notice, Toast};
use crate::config::AppConfig;
use crate::error::ApiError;
use crate::pages::{AuthScreen, DashboardPage, StatisticsPage};
use crate::session::Session;

const NOTICE_MILLIS: u32 = 4_000;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum AuthStatus {
    Checking,
    Authenticated,
    Unauthenticated,
}

/// Everything a page needs from the root: settings, the signed-in session
/// and the two outbound channels (notices and session expiry).
#[derive(Clone, PartialEq)]
pub struct AppContext {
    pub config: AppConfig,
    pub session: Session,
    pub notify: Callback<Notice>,
    pub on_unauthorized: Callback<()>,
}

impl AppContext {
    pub fn client(&self) -> ApiClient {
        ApiClient::new(self.config.api_base.clone(), Some(self.session.token.clone()))
    }

    /// Routes a failed call: expiry goes to the root, the rest to a notice.
    pub fn report(&self, err: ApiError, default: &str) {
        if err.is_unauthorized() {
            self.on_unauthorized.emit(());
        } else {
            self.notify.emit(Notice::error(err.user_message(default)));
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct AppProps {
    /// Loaded once by `main` after logging is up.
    pub config: AppConfig,
}

#[function_component(App)]
pub fn app(props: &AppProps) -> Html {
    let config = Rc::new(props.config.clone());
    let session = use_state(|| Session::load().ok());
    let auth_status = use_state(|| {
        if session.is_some() {
            AuthStatus::Checking
        } else {
            AuthStatus::Unauthenticated
        }
    });
    let active_page = use_state(|| Page::Dashboard);
    let notice = use_state(|| None::<Notice>);
    let notice_timer = use_mut_ref(|| None::<Timeout>);
    // Set while a session expiry is being handled so concurrent 401s act once.
    let expiring: Rc<RefCell<bool>> = use_mut_ref(|| false);

    let notify = {
        let notice = notice.clone();
        let notice_timer = notice_timer.clone();
        Callback::from(move |next: Notice| {
            notice.set(Some(next));
            let notice = notice.clone();
            let timeout = Timeout::new(NOTICE_MILLIS, move || notice.set(None));
            // Dropping the previous timer cancels it.
            *notice_timer.borrow_mut() = Some(timeout);
        })
    };

    let on_unauthorized = {
        let session = session.clone();
        let auth_status = auth_status.clone();
        let notify = notify.clone();
        let expiring = expiring.clone();
        Callback::from(move |_: ()| {
            if *expiring.borrow() {
                return;
            }
            *expiring.borrow_mut() = true;
            warn!("session expired");
            Session::clear();
            session.set(None);
            auth_status.set(AuthStatus::Unauthenticated);
            notify.emit(Notice::warning("Your session has expired. Please log in again."));
        })
    };

    {
        let session = session.clone();
        let auth_status = auth_status.clone();
        let config = config.clone();
        let on_unauthorized = on_unauthorized.clone();
        use_effect_with_deps(
            move |_| {
                if let Some(current) = (*session).clone() {
                    let token = current.token;
                    let client = ApiClient::new(config.api_base.clone(), Some(token.clone()));
                    spawn_local(async move {
                        match client.me().await {
                            Ok(user) => {
                                info!(user = %user.user_id, "session verified");
                                session.set(Some(Session { token, user }));
                                auth_status.set(AuthStatus::Authenticated);
                            }
                            Err(err) if err.is_unauthorized() => on_unauthorized.emit(()),
                            Err(err) => {
                                // Keep the stored session when the backend is unreachable.
                                warn!(%err, "could not verify session");
                                auth_status.set(AuthStatus::Authenticated);
                            }
                        }
                    });
                }
                || ()
            },
            (),
        );
    }

    let on_authenticated = {
        let session = session.clone();
        let auth_status = auth_status.clone();
        let expiring = expiring.clone();
        let active_page = active_page.clone();
        Callback::from(move |next: Session| {
            *expiring.borrow_mut() = false;
            session.set(Some(next));
            active_page.set(Page::Dashboard);
            auth_status.set(AuthStatus::Authenticated);
        })
    };

    let on_logout = {
        let session = session.clone();
        let auth_status = auth_status.clone();
        let notify = notify.clone();
        Callback::from(move |_: ()| {
            Session::clear();
            session.set(None);
            auth_status.set(AuthStatus::Unauthenticated);
            notify.emit(Notice::info("Logged out."));
        })
    };

    let on_select = {
        let active_page = active_page.clone();
        Callback::from(move |page: Page| active_page.set(page))
    };

    let on_dismiss = {
        let notice = notice.clone();
        Callback::from(move |_: ()| notice.set(None))
    };

    let toast = html! { <Toast notice={(*notice).clone()} {on_dismiss} /> };

    let body = match (*auth_status, (*session).clone()) {
        (AuthStatus::Checking, _) => html! {
            <div class="min-h-screen flex items-center justify-center bg-background text-muted-foreground">
                {"Checking session..."}
            </div>
        },
        (AuthStatus::Authenticated, Some(session)) => {
            let user_name = AttrValue::from(session.user.name.clone());
            let context = AppContext {
                config: (*config).clone(),
                session,
                notify: notify.clone(),
                on_unauthorized: on_unauthorized.clone(),
            };
            let content = match *active_page {
                Page::Dashboard => html! { <DashboardPage /> },
                Page::Statistics => html! { <StatisticsPage /> },
            };
            html! {
                <ContextProvider<AppContext> {context}>
                    <Layout active_page={*active_page} {user_name} {on_select} {on_logout}>
                        { content }
                    </Layout>
                </ContextProvider<AppContext>>
            }
        }
        _ => html! {
            <AuthScreen
                api_base={config.api_base.clone()}
                {on_authenticated}
                notify={notify.clone()}
            />
        },
    };

    html! {
        <>
            { body }
            { toast }
        </>
    }
}

