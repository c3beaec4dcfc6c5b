use chrono::NaiveDate;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::BTreeMap;

use crate::models::{MealLogEntry, MealType, NewMealLog, Nutrients};

/// What the log store should do with a new log candidate.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum MergeAction {
    /// Add `by` to the quantity of the existing row `id`.
    Increment { id: i64, by: u32 },
    /// Store the candidate as a new row; its date is resolved.
    Insert { entry: NewMealLog },
}

/// Decide whether `candidate` merges into one of `entries` or becomes a new row.
///
/// The merge key is (username, meal_type, description, date), with an unset
/// candidate date standing for `today`.
pub fn upsert(entries: &[MealLogEntry], candidate: &NewMealLog, today: NaiveDate) -> MergeAction {
    let date = candidate.resolved_date(today);
    match entries.iter().find(|e| e.matches_key(candidate, date)) {
        Some(existing) => MergeAction::Increment {
            id: existing.id,
            by: candidate.quantity,
        },
        None => {
            let mut entry = candidate.clone();
            entry.date = Some(date);
            MergeAction::Insert { entry }
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct GroupedItem {
    pub id: i64,
    pub description: String,
    pub quantity: u32,
    pub nutrients: Nutrients,
}

impl From<&MealLogEntry> for GroupedItem {
    fn from(e: &MealLogEntry) -> Self {
        Self {
            id: e.id,
            description: e.description.clone(),
            quantity: e.quantity,
            nutrients: e.nutrients.clone(),
        }
    }
}

/// One day's meals, ordered breakfast, lunch, dinner, snack, then any other
/// meal type in first-seen order. The four canonical types are always present.
#[derive(Debug, Clone, PartialEq)]
pub struct DayMeals {
    slots: Vec<(MealType, Vec<GroupedItem>)>,
}

impl Default for DayMeals {
    fn default() -> Self {
        Self {
            slots: MealType::CANONICAL
                .iter()
                .map(|t| (t.clone(), Vec::new()))
                .collect(),
        }
    }
}

impl DayMeals {
    fn push(&mut self, meal_type: &MealType, item: GroupedItem) {
        match self.slots.iter_mut().find(|(t, _)| t == meal_type) {
            Some((_, items)) => items.push(item),
            None => self.slots.push((meal_type.clone(), vec![item])),
        }
    }

    pub fn get(&self, meal_type: &MealType) -> Option<&[GroupedItem]> {
        self.slots
            .iter()
            .find(|(t, _)| t == meal_type)
            .map(|(_, items)| items.as_slice())
    }

    pub fn meal_types(&self) -> impl Iterator<Item = &MealType> {
        self.slots.iter().map(|(t, _)| t)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&MealType, &[GroupedItem])> {
        self.slots.iter().map(|(t, items)| (t, items.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// True when no slot holds an item; the canonical slots still count in `len`.
    pub fn has_no_items(&self) -> bool {
        self.slots.iter().all(|(_, items)| items.is_empty())
    }
}

impl Serialize for DayMeals {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.slots.len()))?;
        for (meal_type, items) in &self.slots {
            map.serialize_entry(&meal_type.to_string(), items)?;
        }
        map.end()
    }
}

pub type GroupedView = BTreeMap<NaiveDate, DayMeals>;

/// Partition a user's entries into date -> meal type -> items.
pub fn group(entries: &[MealLogEntry]) -> GroupedView {
    let mut view = GroupedView::new();
    for e in entries {
        view.entry(e.date)
            .or_default()
            .push(&e.meal_type, GroupedItem::from(e));
    }
    view
}
