use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::{Measure, Orientation, Rect, ScrollAxes};
use crate::item::{Item, ItemId};
use crate::motion::InMotionSet;
use crate::registry::ItemRegistry;
use crate::reorder::{apply_reorder, plan_reorder};

/// Identifier handed out by the coordinator when a drop area is registered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AreaId(pub(crate) u64);

impl AreaId {
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for AreaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "area#{}", self.0)
    }
}

/// Drop areas with equal group ids accept drags from each other.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupId(String);

impl GroupId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for GroupId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for GroupId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// The kind of container backing a drop area.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AreaKind {
    /// A flat list that scrolls along its main axis.
    #[default]
    List,
    /// A free scroll view; axes are configured explicitly.
    ScrollView,
    /// A static, non-scrolling view.
    View,
}

/// What changed in an area's list. Passed to the area's change notifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ItemsChange {
    Moved { from: usize, to: usize },
    Inserted { index: usize },
    Removed { index: usize },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DropAreaConfig {
    pub kind: AreaKind,
    pub group: Option<GroupId>,
    pub orientation: Orientation,
    pub scroll_axes: ScrollAxes,
}

impl Default for DropAreaConfig {
    fn default() -> Self {
        Self::list()
    }
}

impl DropAreaConfig {
    pub fn new(kind: AreaKind) -> Self {
        let scroll_axes = match kind {
            AreaKind::List | AreaKind::ScrollView => ScrollAxes::VERTICAL,
            AreaKind::View => ScrollAxes::NONE,
        };
        Self {
            kind,
            group: None,
            orientation: Orientation::Vertical,
            scroll_axes,
        }
    }

    pub fn list() -> Self {
        Self::new(AreaKind::List)
    }

    pub fn scroll_view() -> Self {
        Self::new(AreaKind::ScrollView)
    }

    pub fn view() -> Self {
        Self::new(AreaKind::View)
    }

    /// Allow cross-area drags between every area that shares `group`.
    pub fn group(mut self, group: impl Into<GroupId>) -> Self {
        self.group = Some(group.into());
        self
    }

    /// Lay items out along `orientation`.
    ///
    /// A list follows its main axis for scrolling too; other kinds keep their axes.
    pub fn orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        if self.kind == AreaKind::List {
            self.scroll_axes = match orientation {
                Orientation::Vertical => ScrollAxes::VERTICAL,
                Orientation::Horizontal => ScrollAxes::HORIZONTAL,
            };
        }
        self
    }

    pub fn scroll_axes(mut self, axes: ScrollAxes) -> Self {
        self.scroll_axes = axes;
        self
    }
}

type OnChange<T> = Box<dyn FnMut(&[Item<T>], &ItemsChange)>;

/// One container able to host reorderable items.
pub struct DropArea<T> {
    id: AreaId,
    config: DropAreaConfig,
    registry: ItemRegistry<T>,
    in_motion: InMotionSet,
    container: Option<Box<dyn Measure>>,
    on_change: Option<OnChange<T>>,
}

impl<T> DropArea<T> {
    pub(crate) fn new(id: AreaId, config: DropAreaConfig, items: Vec<Item<T>>) -> Self {
        Self {
            id,
            config,
            registry: ItemRegistry::new(items),
            in_motion: InMotionSet::default(),
            container: None,
            on_change: None,
        }
    }

    pub fn id(&self) -> AreaId {
        self.id
    }

    pub fn config(&self) -> &DropAreaConfig {
        &self.config
    }

    pub fn group(&self) -> Option<&GroupId> {
        self.config.group.as_ref()
    }

    pub fn orientation(&self) -> Orientation {
        self.config.orientation
    }

    pub fn items(&self) -> &[Item<T>] {
        self.registry.items()
    }

    pub fn registry(&self) -> &ItemRegistry<T> {
        &self.registry
    }

    pub fn in_motion(&self) -> &InMotionSet {
        &self.in_motion
    }

    pub fn measure_container(&self) -> Option<Rect> {
        self.container.as_ref().and_then(|handle| handle.measure())
    }

    pub(crate) fn set_container(&mut self, handle: Box<dyn Measure>) {
        self.container = Some(handle);
    }

    pub(crate) fn set_on_change(&mut self, on_change: OnChange<T>) {
        self.on_change = Some(on_change);
    }

    pub(crate) fn registry_mut(&mut self) -> &mut ItemRegistry<T> {
        &mut self.registry
    }

    pub(crate) fn settle(&mut self, id: &ItemId) -> bool {
        self.in_motion.settle(id)
    }

    pub(crate) fn replace_items(&mut self, items: Vec<Item<T>>) {
        self.registry.replace_items(items);
        let registry = &self.registry;
        self.in_motion.retain(|id| registry.contains(id));
    }

    /// Run the reorder engine for `item` and commit the result.
    pub(crate) fn reorder(&mut self, item: &ItemId, dragged: Rect) -> Option<(usize, usize)> {
        let from = self.registry.index_of(item)?;
        let plan = plan_reorder(
            &self.registry,
            &self.in_motion,
            from,
            dragged,
            self.config.orientation,
        )?;
        let (from, to) = (plan.from, plan.to);
        if !apply_reorder(&mut self.registry, &mut self.in_motion, plan) {
            return None;
        }
        self.notify(ItemsChange::Moved { from, to });
        Some((from, to))
    }

    /// Where an item dropped in with `floating` as its rect should be inserted.
    ///
    /// `Some(0)` for an empty area. `None` when the area has items but none of
    /// them can be measured yet.
    pub(crate) fn insertion_index(&self, floating: Rect) -> Option<usize> {
        if self.registry.is_empty() {
            return Some(0);
        }
        let orientation = self.config.orientation;
        let center = floating.center(orientation);
        let mut measured_any = false;
        let mut index = 0;
        for (ix, item) in self.registry.items().iter().enumerate() {
            let Some(rect) = self.registry.measure(&item.id) else {
                continue;
            };
            measured_any = true;
            if rect.center(orientation) < center {
                index = ix + 1;
            }
        }
        measured_any.then_some(index)
    }

    pub(crate) fn take_item(&mut self, id: &ItemId) -> Option<(usize, Item<T>)> {
        let (index, item) = self.registry.remove(id)?;
        self.in_motion.settle(id);
        self.notify(ItemsChange::Removed { index });
        Some((index, item))
    }

    pub(crate) fn put_item(&mut self, index: usize, item: Item<T>) -> Result<usize, Item<T>> {
        let index = self.registry.insert(index, item)?;
        self.notify(ItemsChange::Inserted { index });
        Ok(index)
    }

    fn notify(&mut self, change: ItemsChange) {
        if let Some(on_change) = self.on_change.as_mut() {
            on_change(self.registry.items(), &change);
        }
    }
}
