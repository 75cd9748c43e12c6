use yew::prelude::*;

use crate::{api::User, AuthContext};

fn account_rows(user: &User) -> [(&'static str, String); 2] {
    [
        ("Name", user.name.clone()),
        ("Email", user.email.clone()),
    ]
}

#[function_component(ProfilePage)]
pub fn profile_page() -> Html {
    let auth = use_context::<AuthContext>().expect("auth context missing");

    html! {
        <div class="max-w-xl space-y-4">
            <div>
                <h1 class="text-2xl font-semibold text-slate-900">{"Profile"}</h1>
                <p class="text-sm text-slate-500">{"View your account information."}</p>
            </div>
            <div class="rounded-xl bg-white p-6 shadow-sm border border-slate-100">
                {
                    match auth.session.as_ref() {
                        Some(session) => html! {
                            <dl class="space-y-3 text-sm">
                                { for account_rows(&session.user).into_iter().map(|(label, value)| html! {
                                    <div class="flex justify-between">
                                        <dt class="text-slate-500">{ label }</dt>
                                        <dd class="text-slate-900 font-medium">{ value }</dd>
                                    </div>
                                }) }
                            </dl>
                        },
                        None => html! {
                            <p class="text-sm text-slate-500">
                                {"No account information available. Please log in again."}
                            </p>
                        },
                    }
                }
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_rows_expose_name_and_email() {
        let user = User {
            id: "u-1".into(),
            name: "Alice".into(),
            email: "alice@example.com".into(),
        };
        let rows = account_rows(&user);
        assert_eq!(rows[0], ("Name", "Alice".to_string()));
        assert_eq!(rows[1], ("Email", "alice@example.com".to_string()));
    }
}
