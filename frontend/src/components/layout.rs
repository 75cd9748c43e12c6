use yew::prelude::*;

use crate::{AuthContext, Page};

struct NavItem {
    label: &'static str,
    page: Page,
}

#[derive(Properties, PartialEq)]
pub struct LayoutProps {
    pub children: Children,
    pub active_page: Page,
    pub on_select: Callback<Page>,
}

#[function_component(Layout)]
pub fn layout(props: &LayoutProps) -> Html {
    let auth = use_context::<AuthContext>().expect("auth context missing");

    let nav_items = vec![
        NavItem {
            label: "Dashboard",
            page: Page::Dashboard,
        },
        NavItem {
            label: "Expenses",
            page: Page::Expenses,
        },
        NavItem {
            label: "Profile",
            page: Page::Profile,
        },
    ];

    let on_logout = {
        let on_logout = auth.on_logout.clone();
        Callback::from(move |_| on_logout.emit(()))
    };

    let user_name = auth
        .session
        .as_ref()
        .map(|s| s.user.name.clone())
        .unwrap_or_default();

    html! {
        <div class="min-h-screen flex bg-slate-50">
            <aside class="hidden md:flex w-64 flex-col border-r border-slate-200 bg-white">
                <div class="px-6 py-4 border-b border-slate-200">
                    <h1 class="text-xl font-semibold text-slate-900">{"Spendwise"}</h1>
                    <p class="text-xs text-slate-500">{ user_name }</p>
                </div>
                <nav class="flex-1 px-4 py-4 space-y-1">
                    { for nav_items.iter().map(|item| {
                        let is_active = item.page == props.active_page;
                        let class_name = if is_active {
                            "block w-full text-left rounded-md px-3 py-2 text-sm font-medium bg-blue-50 text-blue-700"
                        } else {
                            "block w-full text-left rounded-md px-3 py-2 text-sm font-medium text-slate-600 hover:bg-slate-100 hover:text-slate-900"
                        };
                        let on_select = props.on_select.clone();
                        let page = item.page;
                        html! {
                            <button type="button" class={class_name} onclick={Callback::from(move |_| on_select.emit(page))}>
                                { item.label }
                            </button>
                        }
                    }) }
                </nav>
                <div class="px-4 py-4 border-t border-slate-200">
                    <button
                        onclick={on_logout}
                        class="w-full rounded-md border border-slate-300 px-3 py-2 text-sm text-slate-700 hover:bg-slate-100"
                    >
                        {"Logout"}
                    </button>
                </div>
            </aside>
            <div class="flex-1 flex flex-col">
                <main class="flex-1 p-4 md:p-6">{ for props.children.iter() }</main>
            </div>
        </div>
    }
}
