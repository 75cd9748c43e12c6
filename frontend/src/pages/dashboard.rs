use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::{
    api::{self, CategorySum, TrendPoint},
    AuthContext,
};

/// Top spending categories, largest first, computed from the month breakdown.
fn top_categories(by_category: &[CategorySum], count: usize) -> Vec<CategorySum> {
    let mut sorted: Vec<CategorySum> = by_category.to_vec();
    sorted.sort_by(|a, b| b.sum.partial_cmp(&a.sum).unwrap_or(std::cmp::Ordering::Equal));
    sorted.truncate(count);
    sorted
}

/// Scales the trend into polyline points for a fixed 300x100 viewBox.
fn trend_points(trend: &[TrendPoint]) -> String {
    let max = trend.iter().map(|t| t.sum).fold(0.0_f64, f64::max);
    if max <= 0.0 {
        return String::new();
    }
    let step = if trend.len() > 1 {
        300.0 / (trend.len() - 1) as f64
    } else {
        0.0
    };
    trend
        .iter()
        .enumerate()
        .map(|(i, t)| format!("{:.1},{:.1}", i as f64 * step, 100.0 - t.sum / max * 90.0))
        .collect::<Vec<_>>()
        .join(" ")
}

#[function_component(DashboardPage)]
pub fn dashboard_page() -> Html {
    let auth = use_context::<AuthContext>().expect("auth context missing");

    let loading = use_state(|| true);
    let error = use_state(|| None::<String>);
    let total = use_state(|| 0.0_f64);
    let by_category = use_state(Vec::<CategorySum>::new);
    let trend = use_state(Vec::<TrendPoint>::new);

    {
        let token = auth.token();
        let loading = loading.clone();
        let error = error.clone();
        let total = total.clone();
        let by_category = by_category.clone();
        let trend = trend.clone();
        use_effect_with_deps(
            move |_| {
                spawn_local(async move {
                    match api::fetch_monthly_analytics(&token).await {
                        Ok(summary) => {
                            total.set(summary.total_this_month);
                            by_category.set(summary.by_category);
                            trend.set(summary.trend);
                        }
                        Err(msg) => error.set(Some(msg)),
                    }
                    loading.set(false);
                });
                || ()
            },
            (),
        );
    }

    let max_category = by_category.iter().map(|c| c.sum).fold(0.0_f64, f64::max);
    let top = top_categories(&by_category, 5);

    html! {
        <div class="space-y-6 max-w-6xl mx-auto w-full">
            <div>
                <h1 class="text-2xl font-semibold text-slate-900">{"Dashboard"}</h1>
                <p class="text-sm text-slate-500">{"Overview of your spending for this month."}</p>
            </div>
            if *loading {
                <p class="text-sm text-slate-500">{"Loading analytics…"}</p>
            } else if let Some(msg) = &*error {
                <div class="rounded-md bg-red-50 px-3 py-2 text-sm text-red-700">{ msg.clone() }</div>
            } else {
                <div class="grid gap-4 md:grid-cols-3">
                    <div class="rounded-xl bg-white p-4 shadow-sm border border-slate-100 flex flex-col justify-center">
                        <div class="text-sm text-slate-500">{"Total this month"}</div>
                        <div class="mt-2 text-2xl font-semibold text-slate-900">
                            { format!("${:.2}", *total) }
                        </div>
                    </div>
                    <div class="rounded-xl bg-white p-4 shadow-sm border border-slate-100 md:col-span-2">
                        <div class="text-sm text-slate-500 mb-2">{"Spending trend"}</div>
                        if trend.is_empty() {
                            <p class="text-sm text-slate-400">{"No spending recorded yet."}</p>
                        } else {
                            <svg viewBox="0 0 300 110" class="w-full h-40" preserveAspectRatio="none">
                                <polyline
                                    points={trend_points(&trend)}
                                    fill="none"
                                    stroke="#3b82f6"
                                    stroke-width="2"
                                />
                            </svg>
                        }
                    </div>
                </div>
                <div class="grid gap-4 md:grid-cols-2">
                    <div class="rounded-xl bg-white p-4 shadow-sm border border-slate-100">
                        <div class="text-sm text-slate-500 mb-2">{"By category"}</div>
                        if by_category.is_empty() {
                            <p class="text-sm text-slate-400">{"No categories yet."}</p>
                        }
                        <ul class="space-y-2">
                            { for by_category.iter().map(|c| {
                                let width = if max_category > 0.0 { c.sum / max_category * 100.0 } else { 0.0 };
                                html! {
                                    <li>
                                        <div class="flex justify-between text-sm">
                                            <span class="text-slate-700">{ c.category.clone() }</span>
                                            <span class="font-medium text-slate-900">{ format!("${:.2}", c.sum) }</span>
                                        </div>
                                        <div class="mt-1 h-2 rounded bg-slate-100">
                                            <div class="h-2 rounded bg-blue-500" style={format!("width: {:.0}%", width)}></div>
                                        </div>
                                    </li>
                                }
                            }) }
                        </ul>
                    </div>
                    <div class="rounded-xl bg-white p-4 shadow-sm border border-slate-100">
                        <div class="text-sm text-slate-500 mb-2">{"Top categories"}</div>
                        <ul class="space-y-2">
                            { for top.iter().map(|c| html! {
                                <li class="flex justify-between text-sm">
                                    <span class="text-slate-700">{ c.category.clone() }</span>
                                    <span class="font-medium text-slate-900">{ format!("${:.2}", c.sum) }</span>
                                </li>
                            }) }
                        </ul>
                    </div>
                </div>
            }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sums(pairs: &[(&str, f64)]) -> Vec<CategorySum> {
        pairs
            .iter()
            .map(|(category, sum)| CategorySum {
                category: category.to_string(),
                sum: *sum,
            })
            .collect()
    }

    #[test]
    fn top_categories_sorts_descending_and_truncates() {
        let input = sums(&[
            ("Food", 50.0),
            ("Rent", 900.0),
            ("Fun", 20.0),
            ("Travel", 120.0),
            ("Bills", 80.0),
            ("Misc", 5.0),
        ]);
        let top = top_categories(&input, 5);
        assert_eq!(top.len(), 5);
        assert_eq!(top[0].category, "Rent");
        assert_eq!(top[1].category, "Travel");
        assert_eq!(top[4].category, "Fun");
    }

    #[test]
    fn top_categories_handles_fewer_than_requested() {
        let top = top_categories(&sums(&[("Food", 50.0)]), 5);
        assert_eq!(top.len(), 1);
    }

    #[test]
    fn trend_points_are_date_ordered_left_to_right() {
        let trend = vec![
            TrendPoint {
                date: "2024-03-01".into(),
                sum: 10.0,
            },
            TrendPoint {
                date: "2024-03-02".into(),
                sum: 20.0,
            },
        ];
        let points = trend_points(&trend);
        assert_eq!(points, "0.0,55.0 300.0,10.0");
    }

    #[test]
    fn trend_points_empty_for_no_spending() {
        assert!(trend_points(&[]).is_empty());
    }
}
