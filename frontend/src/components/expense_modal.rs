use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::api::{Expense, ExpensePayload};

fn today() -> String {
    let now = web_sys::js_sys::Date::new_0();
    format!(
        "{:04}-{:02}-{:02}",
        now.get_full_year(),
        now.get_month() + 1,
        now.get_date()
    )
}

#[derive(Properties, PartialEq)]
pub struct ExpenseModalProps {
    pub open: bool,
    pub initial: Option<Expense>,
    pub on_close: Callback<()>,
    pub on_save: Callback<ExpensePayload>,
}

#[function_component(ExpenseModal)]
pub fn expense_modal(props: &ExpenseModalProps) -> Html {
    let amount = use_state(String::new);
    let category = use_state(String::new);
    let description = use_state(String::new);
    let date = use_state(String::new);
    let error = use_state(|| None::<String>);

    // Prefill from the record under edit, or reset to defaults when adding.
    {
        let amount = amount.clone();
        let category = category.clone();
        let description = description.clone();
        let date = date.clone();
        let error = error.clone();
        use_effect_with_deps(
            move |(_, initial): &(bool, Option<Expense>)| {
                match initial {
                    Some(expense) => {
                        amount.set(format!("{:.2}", expense.amount));
                        category.set(expense.category.clone());
                        description.set(expense.description.clone());
                        date.set(expense.date.clone());
                    }
                    None => {
                        amount.set(String::new());
                        category.set(String::new());
                        description.set(String::new());
                        date.set(today());
                    }
                }
                error.set(None);
                || ()
            },
            (props.open, props.initial.clone()),
        );
    }

    if !props.open {
        return html! {};
    }

    let on_input = |state: UseStateHandle<String>| {
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            state.set(input.value());
        })
    };

    let on_submit = {
        let amount = amount.clone();
        let category = category.clone();
        let description = description.clone();
        let date = date.clone();
        let error = error.clone();
        let on_save = props.on_save.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            let parsed_amount = amount.trim().parse::<f64>().unwrap_or(0.0);
            if parsed_amount <= 0.0 {
                error.set(Some("Amount must be greater than 0.".to_string()));
                return;
            }
            if category.trim().is_empty() {
                error.set(Some("Category is required.".to_string()));
                return;
            }
            if date.trim().is_empty() {
                error.set(Some("Date is required.".to_string()));
                return;
            }

            error.set(None);
            on_save.emit(ExpensePayload {
                amount: parsed_amount,
                category: category.trim().to_string(),
                description: description.trim().to_string(),
                date: date.trim().to_string(),
            });
        })
    };

    let on_close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_| on_close.emit(()))
    };

    html! {
        <div class="fixed inset-0 z-40 flex items-center justify-center bg-black/30">
            <div class="w-full max-w-md rounded-lg bg-white shadow-lg">
                <div class="flex items-center justify-between border-b px-4 py-3">
                    <h2 class="text-lg font-semibold">
                        { if props.initial.is_some() { "Edit Expense" } else { "Add Expense" } }
                    </h2>
                    <button onclick={on_close.clone()} class="text-slate-500 hover:text-slate-700">{"×"}</button>
                </div>
                <form onsubmit={on_submit} class="space-y-4 px-4 py-4">
                    <div>
                        <label class="block text-sm font-medium text-slate-700">{"Amount"}</label>
                        <input
                            type="number"
                            step="0.01"
                            value={(*amount).clone()}
                            oninput={on_input(amount.clone())}
                            class="mt-1 w-full rounded-md border border-slate-300 px-3 py-2 text-sm"
                            required=true
                        />
                    </div>
                    <div>
                        <label class="block text-sm font-medium text-slate-700">{"Category"}</label>
                        <input
                            type="text"
                            value={(*category).clone()}
                            oninput={on_input(category.clone())}
                            class="mt-1 w-full rounded-md border border-slate-300 px-3 py-2 text-sm"
                            required=true
                        />
                    </div>
                    <div>
                        <label class="block text-sm font-medium text-slate-700">{"Description"}</label>
                        <input
                            type="text"
                            value={(*description).clone()}
                            oninput={on_input(description.clone())}
                            class="mt-1 w-full rounded-md border border-slate-300 px-3 py-2 text-sm"
                        />
                    </div>
                    <div>
                        <label class="block text-sm font-medium text-slate-700">{"Date"}</label>
                        <input
                            type="date"
                            value={(*date).clone()}
                            oninput={on_input(date.clone())}
                            class="mt-1 w-full rounded-md border border-slate-300 px-3 py-2 text-sm"
                            required=true
                        />
                    </div>
                    if let Some(msg) = &*error {
                        <div class="text-sm text-red-600">{ msg.clone() }</div>
                    }
                    <div class="flex justify-end gap-2 pt-2">
                        <button
                            type="button"
                            onclick={on_close}
                            class="rounded-md border border-slate-300 px-3 py-1.5 text-sm text-slate-700"
                        >
                            {"Cancel"}
                        </button>
                        <button
                            type="submit"
                            class="rounded-md bg-blue-600 px-4 py-1.5 text-sm font-medium text-white hover:bg-blue-500"
                        >
                            {"Save"}
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}
