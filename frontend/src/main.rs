use yew::prelude::*;

mod api;
mod components;
mod pages;
mod store;

use components::layout::Layout;
use pages::{auth::AuthPage, dashboard::DashboardPage, expenses::ExpensesPage, profile::ProfilePage};
use store::{BrowserStorage, Session};

#[derive(Clone, Copy, PartialEq)]
pub enum Page {
    Dashboard,
    Expenses,
    Profile,
}

/// Auth state handed to views through context instead of a global store.
#[derive(Clone, PartialEq)]
pub struct AuthContext {
    pub session: Option<Session>,
    pub on_login: Callback<Session>,
    pub on_logout: Callback<()>,
}

impl AuthContext {
    pub fn token(&self) -> String {
        self.session
            .as_ref()
            .map(|s| s.token.clone())
            .unwrap_or_default()
    }
}

#[function_component(App)]
fn app() -> Html {
    let session = use_state(|| store::hydrate(&BrowserStorage));
    let page = use_state(|| Page::Dashboard);

    let on_login = {
        let session = session.clone();
        Callback::from(move |s: Session| {
            store::persist(&BrowserStorage, &s);
            session.set(Some(s));
        })
    };

    let on_logout = {
        let session = session.clone();
        let page = page.clone();
        Callback::from(move |_| {
            store::clear(&BrowserStorage);
            session.set(None);
            page.set(Page::Dashboard);
        })
    };

    let ctx = AuthContext {
        session: (*session).clone(),
        on_login,
        on_logout,
    };

    let on_select = {
        let page = page.clone();
        Callback::from(move |p: Page| page.set(p))
    };

    // Route guard: without a session only the login/signup screen renders.
    let body = if session.is_none() {
        html! { <AuthPage /> }
    } else {
        html! {
            <Layout active_page={*page} on_select={on_select}>
                {
                    match *page {
                        Page::Dashboard => html! { <DashboardPage /> },
                        Page::Expenses => html! { <ExpensesPage /> },
                        Page::Profile => html! { <ProfilePage /> },
                    }
                }
            </Layout>
        }
    };

    html! {
        <ContextProvider<AuthContext> context={ctx}>
            { body }
        </ContextProvider<AuthContext>>
    }
}

fn main() {
    yew::Renderer::<App>::new().render();
}
