use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::{
    api::{self, Expense, ExpensePayload},
    components::expense_modal::ExpenseModal,
    AuthContext,
};

const PAGE_SIZE: i64 = 10;

#[function_component(ExpensesPage)]
pub fn expenses_page() -> Html {
    let auth = use_context::<AuthContext>().expect("auth context missing");

    let expenses = use_state(Vec::<Expense>::new);
    let loading = use_state(|| true);
    let error = use_state(|| None::<String>);
    let search = use_state(String::new);
    let applied_search = use_state(String::new);
    let page = use_state(|| 1_i64);
    let total_pages = use_state(|| 1_i64);
    let modal_open = use_state(|| false);
    let editing = use_state(|| None::<Expense>);
    // Bumped after every mutation to re-run the listing effect.
    let reload = use_state(|| 0_u32);

    {
        let token = auth.token();
        let expenses = expenses.clone();
        let loading = loading.clone();
        let error = error.clone();
        let total_pages = total_pages.clone();
        use_effect_with_deps(
            move |(page, applied_search, _): &(i64, String, u32)| {
                let page = *page;
                let applied_search = applied_search.clone();
                loading.set(true);
                spawn_local(async move {
                    match api::fetch_expenses(&token, page, PAGE_SIZE, &applied_search).await {
                        Ok(list) => {
                            expenses.set(list.data);
                            total_pages.set(list.pagination.total_pages);
                            error.set(None);
                        }
                        Err(msg) => error.set(Some(msg)),
                    }
                    loading.set(false);
                });
                || ()
            },
            (*page, (*applied_search).clone(), *reload),
        );
    }

    let on_search_input = {
        let search = search.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            search.set(input.value());
        })
    };

    // A new search always starts from the first page.
    let on_search_submit = {
        let search = search.clone();
        let applied_search = applied_search.clone();
        let page = page.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            page.set(1);
            applied_search.set((*search).clone());
        })
    };

    let on_add = {
        let modal_open = modal_open.clone();
        let editing = editing.clone();
        Callback::from(move |_| {
            editing.set(None);
            modal_open.set(true);
        })
    };

    let on_edit = {
        let modal_open = modal_open.clone();
        let editing = editing.clone();
        Callback::from(move |expense: Expense| {
            editing.set(Some(expense));
            modal_open.set(true);
        })
    };

    let on_close = {
        let modal_open = modal_open.clone();
        let editing = editing.clone();
        Callback::from(move |_| {
            modal_open.set(false);
            editing.set(None);
        })
    };

    let on_save = {
        let token = auth.token();
        let editing = editing.clone();
        let modal_open = modal_open.clone();
        let error = error.clone();
        let reload = reload.clone();
        Callback::from(move |payload: ExpensePayload| {
            let token = token.clone();
            let editing_handle = editing.clone();
            let modal_open = modal_open.clone();
            let error = error.clone();
            let reload = reload.clone();
            let editing_id = (*editing).as_ref().map(|e| e.id.clone());
            spawn_local(async move {
                let result = match editing_id {
                    Some(id) => api::update_expense(&token, &id, &payload).await,
                    None => api::create_expense(&token, &payload).await,
                };
                match result {
                    Ok(_) => {
                        modal_open.set(false);
                        editing_handle.set(None);
                        reload.set(*reload + 1);
                    }
                    Err(msg) => error.set(Some(msg)),
                }
            });
        })
    };

    let on_delete = {
        let token = auth.token();
        let error = error.clone();
        let reload = reload.clone();
        Callback::from(move |expense: Expense| {
            let confirmed = web_sys::window()
                .map(|w| w.confirm_with_message("Delete this expense?").unwrap_or(false))
                .unwrap_or(false);
            if !confirmed {
                return;
            }
            let token = token.clone();
            let error = error.clone();
            let reload = reload.clone();
            spawn_local(async move {
                match api::delete_expense(&token, &expense.id).await {
                    Ok(()) => reload.set(*reload + 1),
                    Err(msg) => error.set(Some(msg)),
                }
            });
        })
    };

    let on_prev = {
        let page = page.clone();
        Callback::from(move |_| {
            if *page > 1 {
                page.set(*page - 1);
            }
        })
    };
    let on_next = {
        let page = page.clone();
        let total_pages = total_pages.clone();
        Callback::from(move |_| {
            if *page < *total_pages {
                page.set(*page + 1);
            }
        })
    };

    html! {
        <div class="space-y-4">
            <div class="flex flex-col md:flex-row md:items-center md:justify-between gap-3">
                <div>
                    <h1 class="text-2xl font-semibold text-slate-900">{"Expenses"}</h1>
                    <p class="text-sm text-slate-500">{"View, search, and manage all your expenses."}</p>
                </div>
                <button
                    onclick={on_add}
                    class="inline-flex items-center rounded-md bg-blue-600 px-4 py-2 text-sm font-medium text-white hover:bg-blue-500"
                >
                    {"+ Add Expense"}
                </button>
            </div>

            <form onsubmit={on_search_submit} class="flex flex-col md:flex-row gap-2 md:items-center">
                <input
                    type="text"
                    placeholder="Search by description or category"
                    value={(*search).clone()}
                    oninput={on_search_input}
                    class="flex-1 rounded-md border border-slate-300 px-3 py-2 text-sm"
                />
                <button
                    type="submit"
                    class="rounded-md border border-slate-300 px-4 py-2 text-sm text-slate-700 hover:bg-slate-100"
                >
                    {"Search"}
                </button>
            </form>

            if *loading {
                <p class="text-sm text-slate-500">{"Loading expenses…"}</p>
            } else if let Some(msg) = &*error {
                <div class="rounded-md bg-red-50 px-3 py-2 text-sm text-red-700">{ msg.clone() }</div>
            } else {
                <div class="overflow-x-auto rounded-xl border border-slate-200 bg-white shadow-sm">
                    <table class="min-w-full text-sm">
                        <thead class="bg-slate-50">
                            <tr>
                                <th class="px-4 py-2 text-left font-medium text-slate-600">{"Date"}</th>
                                <th class="px-4 py-2 text-left font-medium text-slate-600">{"Category"}</th>
                                <th class="px-4 py-2 text-left font-medium text-slate-600">{"Description"}</th>
                                <th class="px-4 py-2 text-right font-medium text-slate-600">{"Amount"}</th>
                                <th class="px-4 py-2 text-right font-medium text-slate-600">{"Actions"}</th>
                            </tr>
                        </thead>
                        <tbody>
                            { for expenses.iter().map(|expense| {
                                let edit_expense = expense.clone();
                                let delete_expense = expense.clone();
                                let on_edit = on_edit.clone();
                                let on_delete = on_delete.clone();
                                html! {
                                    <tr class="border-t border-slate-100">
                                        <td class="px-4 py-2 text-slate-700">{ expense.date.clone() }</td>
                                        <td class="px-4 py-2 text-slate-700">{ expense.category.clone() }</td>
                                        <td class="px-4 py-2 text-slate-500">{ expense.description.clone() }</td>
                                        <td class="px-4 py-2 text-right text-slate-900 font-medium">
                                            { format!("${:.2}", expense.amount) }
                                        </td>
                                        <td class="px-4 py-2 text-right space-x-2">
                                            <button
                                                onclick={Callback::from(move |_| on_edit.emit(edit_expense.clone()))}
                                                class="text-blue-600 hover:text-blue-500 text-xs"
                                            >
                                                {"Edit"}
                                            </button>
                                            <button
                                                onclick={Callback::from(move |_| on_delete.emit(delete_expense.clone()))}
                                                class="text-red-600 hover:text-red-500 text-xs"
                                            >
                                                {"Delete"}
                                            </button>
                                        </td>
                                    </tr>
                                }
                            }) }
                            if expenses.is_empty() {
                                <tr>
                                    <td colspan="5" class="px-4 py-6 text-center text-sm text-slate-500">
                                        {"No expenses found. Try adjusting your search or add a new expense."}
                                    </td>
                                </tr>
                            }
                        </tbody>
                    </table>
                </div>
            }

            <div class="flex justify-between items-center text-sm text-slate-600">
                <span>{ format!("Page {} of {}", *page, (*total_pages).max(1)) }</span>
                <div class="space-x-2">
                    <button
                        disabled={*page <= 1}
                        onclick={on_prev}
                        class="rounded-md border border-slate-300 px-3 py-1 disabled:opacity-50"
                    >
                        {"Prev"}
                    </button>
                    <button
                        disabled={*page >= *total_pages}
                        onclick={on_next}
                        class="rounded-md border border-slate-300 px-3 py-1 disabled:opacity-50"
                    >
                        {"Next"}
                    </button>
                </div>
            </div>

            <ExpenseModal
                open={*modal_open}
                initial={(*editing).clone()}
                on_close={on_close}
                on_save={on_save}
            />
        </div>
    }
}
