use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::{api, store::Session, AuthContext};

#[function_component(AuthPage)]
pub fn auth_page() -> Html {
    let auth = use_context::<AuthContext>().expect("auth context missing");

    let is_login = use_state(|| true);
    let name = use_state(String::new);
    let email = use_state(String::new);
    let password = use_state(String::new);
    let error = use_state(|| None::<String>);
    let loading = use_state(|| false);

    let toggle_mode = {
        let is_login = is_login.clone();
        let error = error.clone();
        Callback::from(move |_| {
            is_login.set(!*is_login);
            error.set(None);
        })
    };

    let on_input = |state: UseStateHandle<String>| {
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            state.set(input.value());
        })
    };

    let on_submit = {
        let is_login = is_login.clone();
        let name = name.clone();
        let email = email.clone();
        let password = password.clone();
        let error = error.clone();
        let loading = loading.clone();
        let on_login = auth.on_login.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            let name_val = name.trim().to_string();
            let email_val = email.trim().to_string();
            let password_val = (*password).clone();
            let signing_up = !*is_login;

            if email_val.is_empty() || password_val.is_empty() || (signing_up && name_val.is_empty())
            {
                error.set(Some("Please complete all fields.".to_string()));
                return;
            }

            error.set(None);
            loading.set(true);

            let error = error.clone();
            let loading = loading.clone();
            let on_login = on_login.clone();
            spawn_local(async move {
                let result = if signing_up {
                    api::signup(&name_val, &email_val, &password_val).await
                } else {
                    api::login(&email_val, &password_val).await
                };
                match result {
                    Ok(resp) => on_login.emit(Session {
                        user: resp.user,
                        token: resp.token,
                    }),
                    Err(msg) => error.set(Some(msg)),
                }
                loading.set(false);
            });
        })
    };

    html! {
        <div class="min-h-screen flex items-center justify-center bg-slate-50">
            <div class="w-full max-w-sm rounded-xl bg-white p-6 shadow-sm border border-slate-100">
                <h1 class="text-xl font-semibold text-slate-900">
                    { if *is_login { "Sign in to Spendwise" } else { "Create your account" } }
                </h1>
                <p class="text-sm text-slate-500 mb-4">{"Track your spending in one place."}</p>
                <form onsubmit={on_submit} class="space-y-4">
                    if !*is_login {
                        <div>
                            <label class="block text-sm font-medium text-slate-700">{"Name"}</label>
                            <input
                                type="text"
                                value={(*name).clone()}
                                oninput={on_input(name.clone())}
                                class="mt-1 w-full rounded-md border border-slate-300 px-3 py-2 text-sm"
                            />
                        </div>
                    }
                    <div>
                        <label class="block text-sm font-medium text-slate-700">{"Email"}</label>
                        <input
                            type="email"
                            value={(*email).clone()}
                            oninput={on_input(email.clone())}
                            class="mt-1 w-full rounded-md border border-slate-300 px-3 py-2 text-sm"
                        />
                    </div>
                    <div>
                        <label class="block text-sm font-medium text-slate-700">{"Password"}</label>
                        <input
                            type="password"
                            value={(*password).clone()}
                            oninput={on_input(password.clone())}
                            class="mt-1 w-full rounded-md border border-slate-300 px-3 py-2 text-sm"
                        />
                    </div>
                    if let Some(msg) = &*error {
                        <div class="rounded-md bg-red-50 px-3 py-2 text-sm text-red-700">{ msg.clone() }</div>
                    }
                    <button
                        type="submit"
                        disabled={*loading}
                        class="w-full rounded-md bg-blue-600 px-4 py-2 text-sm font-medium text-white hover:bg-blue-500 disabled:opacity-50"
                    >
                        { if *loading { "Please wait…" } else if *is_login { "Login" } else { "Sign up" } }
                    </button>
                </form>
                <div class="mt-4 text-center text-sm text-slate-500">
                    { if *is_login { "No account?" } else { "Already have an account?" } }
                    <button class="ml-2 text-blue-600 font-medium" onclick={toggle_mode}>
                        { if *is_login { "Sign up" } else { "Login" } }
                    </button>
                </div>
            </div>
        </div>
    }
}
