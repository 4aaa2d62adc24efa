use leptos::prelude::*;
use shared_types::{month_grid, CalendarDate};
use thaw::*;

const WEEKDAYS: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];

/// Month calendar with past days disabled. Paging between months never
/// changes the selection.
#[component]
pub fn CalendarPicker(
    #[prop(into)] selected: Signal<CalendarDate>,
    today: CalendarDate,
    on_select: impl Fn(CalendarDate) + 'static + Copy + Send + Sync,
    #[prop(optional, into)] disabled: Signal<bool>,
) -> impl IntoView {
    let displayed_month = RwSignal::new(selected.get_untracked().start_of_month());
    let grid = Memo::new(move |_| month_grid(displayed_month.get(), Some(selected.get()), today));

    view! {
        <div class="calendar-picker">
            <div class="calendar-picker-header">
                <Button
                    appearance=ButtonAppearance::Subtle
                    size=ButtonSize::Small
                    on_click=move |_| displayed_month.set(grid.get_untracked().previous_month())
                >
                    "‹"
                </Button>
                <span class="calendar-picker-month">{move || grid.with(|g| g.label())}</span>
                <Button
                    appearance=ButtonAppearance::Subtle
                    size=ButtonSize::Small
                    on_click=move |_| displayed_month.set(grid.get_untracked().next_month())
                >
                    "›"
                </Button>
            </div>

            <div class="calendar-weekdays">
                {WEEKDAYS
                    .iter()
                    .map(|name| view! { <div class="calendar-weekday">{*name}</div> })
                    .collect::<Vec<_>>()}
            </div>

            <div class="calendar-days">
                {move || {
                    grid.get()
                        .cells
                        .into_iter()
                        .map(|cell| {
                            let date = cell.date;
                            let selectable = cell.is_selectable();
                            view! {
                                <button
                                    type="button"
                                    class="calendar-day"
                                    class:outside={!cell.in_month}
                                    class:past=cell.past
                                    class:selected=cell.selected
                                    data-date=cell.key()
                                    disabled={move || !selectable || disabled.get()}
                                    on:click=move |_| {
                                        if selectable && !disabled.get_untracked() {
                                            on_select(date);
                                        }
                                    }
                                >
                                    {cell.day}
                                </button>
                            }
                        })
                        .collect::<Vec<_>>()
                }}
            </div>
        </div>
    }
}
