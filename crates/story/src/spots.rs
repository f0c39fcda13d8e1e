use std::cell::RefCell;
use std::rc::Rc;

use gpui::prelude::FluentBuilder as _;
use gpui::*;
use gpui_component::ActiveTheme as _;
use gpui_component::checkbox::Checkbox;
use gpui_component::{Icon, IconName, Sizable as _, h_flex, v_flex};
use gpui_dnd_sort::{
    DndSortConfig, DndSortItem, DndSortLayout, DndSortReorder, DndSortRowState, DndSortState,
    dnd_sort,
};
use gpui_dnd_sort_core::sort_keys::{SequenceUpdate, resequence};
use tracing::{info, warn};

const SEQUENCE_STEP: i64 = 10;
const PINNED_TAG: &str = "tag/favorites";
const TAG_CONFIG: &str = r#"{ "cancel_policy": "rollback", "thresholds": { "mouse": 6 } }"#;

#[derive(Clone)]
pub struct Category {
    spots: usize,
}

/// Stored sequence numbers of one table, in display order.
struct SortKeys {
    rows: Vec<(SharedString, i64)>,
    last_updates: Vec<SequenceUpdate<SharedString>>,
}

impl SortKeys {
    fn new<T>(items: &[DndSortItem<T>]) -> Self {
        let rows = items
            .iter()
            .filter(|item| !item.is_disabled())
            .enumerate()
            .map(|(ix, item)| (item.id.clone(), ix as i64 * SEQUENCE_STEP))
            .collect();
        Self {
            rows,
            last_updates: Vec::new(),
        }
    }

    fn apply(&mut self, reorder: &DndSortReorder) {
        reorder.apply_to(&mut self.rows);
        self.last_updates = resequence(&self.rows, SEQUENCE_STEP);
        for update in &self.last_updates {
            if let Some(row) = self.rows.iter_mut().find(|(id, _)| *id == update.key) {
                row.1 = update.sequence;
            }
        }
        info!(
            item = %reorder.item,
            changed = self.last_updates.len(),
            "sequence numbers updated"
        );
    }

    fn dump(&self) -> String {
        let rows = self
            .rows
            .iter()
            .map(|(id, sequence)| format!("{sequence:>4}  {id}"));
        let updates = self
            .last_updates
            .iter()
            .map(|update| format!("  -> {} = {}", update.key, update.sequence));
        rows.chain(updates).collect::<Vec<_>>().join("\n")
    }
}

pub struct SpotsExample {
    categories: Entity<DndSortState<Category>>,
    tags: Entity<DndSortState<()>>,
    category_keys: Rc<RefCell<SortKeys>>,
    tag_keys: Rc<RefCell<SortKeys>>,
    locked: bool,
    tags_as_list: bool,
    _subscriptions: Vec<Subscription>,
}

impl SpotsExample {
    pub fn view(_window: &mut Window, cx: &mut App) -> Entity<Self> {
        let category_items = demo_categories();
        let tag_items = demo_tags();
        let category_keys = Rc::new(RefCell::new(SortKeys::new(&category_items)));
        let tag_keys = Rc::new(RefCell::new(SortKeys::new(&tag_items)));

        let tag_config = DndSortConfig::from_json(TAG_CONFIG).unwrap_or_else(|err| {
            warn!(%err, "bad tag list options; using defaults");
            DndSortConfig::default()
        });

        let categories = cx.new(|cx| {
            DndSortState::new(cx)
                .items(category_items)
                .container_class("category-list")
                .drag_handle_width(px(28.))
                .on_reorder({
                    let keys = category_keys.clone();
                    move |reorder, _items| keys.borrow_mut().apply(reorder)
                })
        });
        let tags = cx.new(|cx| {
            DndSortState::new(cx)
                .items(tag_items)
                .layout(DndSortLayout::Wrap)
                .container_class("tag-list")
                .config(tag_config)
                .can_drop(|_reorder, items| {
                    items
                        .first()
                        .is_none_or(|item| item.id.as_ref() == PINNED_TAG)
                })
                .on_reorder({
                    let keys = tag_keys.clone();
                    move |reorder, _items| keys.borrow_mut().apply(reorder)
                })
        });

        cx.new(|cx| {
            let _subscriptions = vec![
                cx.observe(&categories, |_, _, cx| cx.notify()),
                cx.observe(&tags, |_, _, cx| cx.notify()),
            ];
            Self {
                categories,
                tags,
                category_keys,
                tag_keys,
                locked: false,
                tags_as_list: false,
                _subscriptions,
            }
        })
    }

    fn set_locked(&mut self, locked: bool, cx: &mut Context<Self>) {
        self.locked = locked;
        self.categories.update(cx, |state, cx| {
            let config = state.dnd_config().clone().disabled(locked);
            state.set_config(config, cx);
        });
        self.tags.update(cx, |state, cx| {
            let config = state.dnd_config().clone().disabled(locked);
            state.set_config(config, cx);
        });
        cx.notify();
    }

    fn set_tags_as_list(&mut self, as_list: bool, cx: &mut Context<Self>) {
        self.tags_as_list = as_list;
        let layout = if as_list {
            DndSortLayout::Stack
        } else {
            DndSortLayout::Wrap
        };
        self.tags
            .update(cx, |state, cx| state.set_layout(layout, cx));
        cx.notify();
    }
}

impl Render for SpotsExample {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let theme = cx.theme();
        let dump = format!(
            "categories\n{}\n\ntags\n{}",
            self.category_keys.borrow().dump(),
            self.tag_keys.borrow().dump()
        );

        v_flex()
            .size_full()
            .p(px(16.))
            .gap_y_3()
            .child(
                v_flex()
                    .gap_y_1()
                    .child(
                        div()
                            .text_xl()
                            .font_weight(FontWeight::BOLD)
                            .child("Spots"),
                    )
                    .child(div().text_sm().text_color(theme.muted_foreground).child(
                        "Drag categories by their grip and tags anywhere. Favorites must stay the first tag; Esc cancels a tag drag.",
                    )),
            )
            .child(
                h_flex()
                    .gap_x_4()
                    .child(
                        Checkbox::new("spots-lock")
                            .label("Lock sorting")
                            .checked(self.locked)
                            .small()
                            .on_click(cx.listener(|this, checked: &bool, _window, cx| {
                                this.set_locked(*checked, cx);
                            })),
                    )
                    .child(
                        Checkbox::new("spots-tags-as-list")
                            .label("Tags as list")
                            .checked(self.tags_as_list)
                            .small()
                            .on_click(cx.listener(|this, checked: &bool, _window, cx| {
                                this.set_tags_as_list(*checked, cx);
                            })),
                    ),
            )
            .child(
                h_flex()
                    .flex_1()
                    .min_h(px(0.))
                    .items_start()
                    .gap_x_3()
                    .child(
                        panel("Categories", cx)
                            .w(px(320.))
                            .h_full()
                            .child(dnd_sort(
                                &self.categories,
                                |_ix, item, row_state, _window, cx| {
                                    render_category(item, row_state, cx)
                                },
                            )),
                    )
                    .child(
                        panel("Tags", cx)
                            .flex_1()
                            .min_w(px(0.))
                            .child(dnd_sort(
                                &self.tags,
                                |_ix, item, row_state, _window, cx| {
                                    render_tag(item, row_state, cx)
                                },
                            )),
                    )
                    .child(
                        panel("Sequence numbers", cx)
                            .w(px(260.))
                            .h_full()
                            .child(render_dump(dump)),
                    ),
            )
    }
}

fn panel(title: &'static str, cx: &App) -> Div {
    let theme = cx.theme();
    v_flex()
        .gap_y_2()
        .p(px(12.))
        .rounded(px(12.))
        .border_1()
        .border_color(theme.border)
        .bg(theme.background)
        .child(
            div()
                .text_sm()
                .font_weight(FontWeight::MEDIUM)
                .child(title),
        )
}

fn render_category(
    item: &DndSortItem<Category>,
    row_state: DndSortRowState,
    cx: &mut App,
) -> AnyElement {
    let theme = cx.theme();
    let icon = if row_state.disabled {
        IconName::Layers
    } else {
        IconName::Menu
    };

    h_flex()
        .gap_x_2()
        .items_center()
        .px_2()
        .py(px(6.))
        .rounded(px(8.))
        .bg(theme.background)
        .when(row_state.ghost, |this| {
            this.bg(theme.popover).border_1().border_color(theme.border)
        })
        .when(row_state.disabled, |this| {
            this.text_color(theme.muted_foreground)
        })
        .child(Icon::from(icon).small().text_color(theme.muted_foreground))
        .child(div().flex_1().child(item.label.clone()))
        .child(
            div()
                .text_xs()
                .text_color(theme.muted_foreground)
                .child(item.data.spots.to_string()),
        )
        .into_any_element()
}

fn render_tag(item: &DndSortItem<()>, row_state: DndSortRowState, cx: &mut App) -> AnyElement {
    let theme = cx.theme();
    div()
        .px_3()
        .py_1()
        .rounded(px(14.))
        .text_sm()
        .bg(theme.secondary)
        .text_color(theme.secondary_foreground)
        .when(item.id.as_ref() == PINNED_TAG, |this| {
            this.bg(theme.accent).text_color(theme.accent_foreground)
        })
        .when(row_state.ghost, |this| this.border_1().border_color(theme.border))
        .child(item.label.clone())
        .into_any_element()
}

fn render_dump(text: String) -> impl IntoElement {
    let lines = text
        .lines()
        .map(|line| div().text_xs().font_family("monospace").child(line.to_string()));
    v_flex().gap_y_0p5().children(lines)
}

fn demo_categories() -> Vec<DndSortItem<Category>> {
    vec![
        DndSortItem::new("category/all", "All spots", Category { spots: 42 }).disabled(true),
        DndSortItem::new("category/coffee", "Coffee", Category { spots: 9 }),
        DndSortItem::new("category/food", "Food", Category { spots: 12 }),
        DndSortItem::new("category/parks", "Parks", Category { spots: 6 }),
        DndSortItem::new("category/museums", "Museums", Category { spots: 4 }),
        DndSortItem::new("category/beaches", "Beaches", Category { spots: 3 }),
        DndSortItem::new("category/bookshops", "Bookshops", Category { spots: 5 }),
        DndSortItem::new("category/viewpoints", "Viewpoints", Category { spots: 3 }),
    ]
}

fn demo_tags() -> Vec<DndSortItem<()>> {
    [
        (PINNED_TAG, "Favorites"),
        ("tag/outdoor", "Outdoor"),
        ("tag/rainy-day", "Rainy day"),
        ("tag/late-night", "Late night"),
        ("tag/kids", "Kids"),
        ("tag/dog-friendly", "Dog friendly"),
        ("tag/cheap", "Cheap"),
        ("tag/date", "Date night"),
        ("tag/wifi", "Wi-Fi"),
        ("tag/quiet", "Quiet"),
    ]
    .into_iter()
    .map(|(id, label)| DndSortItem::new(id, label, ()))
    .collect()
}
