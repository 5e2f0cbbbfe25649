use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Fallback category absorbing transactions whose own category was deleted.
pub const OTHER_CATEGORY_ID: Uuid = Uuid::from_u128(8);
/// Category aggregated as its own savings bucket, never as an expense.
pub const SAVINGS_CATEGORY_ID: Uuid = Uuid::from_u128(10);

/// Hex colors offered by the category form.
pub const COLOR_PALETTE: [&str; 10] = [
    "#F87171", "#818CF8", "#34D399", "#FBBF24", "#A78BFA", "#F472B6", "#60A5FA", "#10B981",
    "#F59E0B", "#94A3B8",
];

/// Categorises ledger entries for budgeting and reporting.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub icon: CategoryIcon,
    pub color: String,
    pub kind: CategoryKind,
}

impl Category {
    /// Materializes a draft with a freshly assigned id.
    pub fn from_draft(draft: CategoryDraft) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: draft.name,
            icon: draft.icon,
            color: draft.color,
            kind: draft.kind,
        }
    }

    /// Whether this category may never be deleted.
    pub fn is_protected(&self) -> bool {
        Self::is_protected_id(self.id)
    }

    /// Whether `id` is one of the two reserved category ids.
    pub fn is_protected_id(id: Uuid) -> bool {
        id == OTHER_CATEGORY_ID || id == SAVINGS_CATEGORY_ID
    }

    /// The fixed category set seeded at first run and restored by a reset.
    pub fn defaults() -> Vec<Category> {
        DEFAULT_SET.clone()
    }
}

/// Supported category types.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum CategoryKind {
    Expense,
    Income,
    Both,
}

impl fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryKind::Expense => write!(f, "expense"),
            CategoryKind::Income => write!(f, "income"),
            CategoryKind::Both => write!(f, "both"),
        }
    }
}

/// Closed set of icon identifiers.
///
/// Glyph resolution belongs to the presentation layer; the domain only
/// stores and passes the identifier through.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum CategoryIcon {
    Utensils,
    ShoppingBag,
    Car,
    Tv,
    Dumbbell,
    HeartPulse,
    GraduationCap,
    #[default]
    Wallet,
    PiggyBank,
    Gift,
    Home,
    Coffee,
    Gamepad,
    Music,
    Camera,
}

impl CategoryIcon {
    /// Every selectable icon, in presentation order.
    pub const ALL: [CategoryIcon; 15] = [
        CategoryIcon::Utensils,
        CategoryIcon::ShoppingBag,
        CategoryIcon::Car,
        CategoryIcon::Tv,
        CategoryIcon::Dumbbell,
        CategoryIcon::HeartPulse,
        CategoryIcon::GraduationCap,
        CategoryIcon::Wallet,
        CategoryIcon::PiggyBank,
        CategoryIcon::Gift,
        CategoryIcon::Home,
        CategoryIcon::Coffee,
        CategoryIcon::Gamepad,
        CategoryIcon::Music,
        CategoryIcon::Camera,
    ];

    /// Stable identifier string, as shown by pickers.
    pub fn name(self) -> &'static str {
        match self {
            CategoryIcon::Utensils => "Utensils",
            CategoryIcon::ShoppingBag => "ShoppingBag",
            CategoryIcon::Car => "Car",
            CategoryIcon::Tv => "Tv",
            CategoryIcon::Dumbbell => "Dumbbell",
            CategoryIcon::HeartPulse => "HeartPulse",
            CategoryIcon::GraduationCap => "GraduationCap",
            CategoryIcon::Wallet => "Wallet",
            CategoryIcon::PiggyBank => "PiggyBank",
            CategoryIcon::Gift => "Gift",
            CategoryIcon::Home => "Home",
            CategoryIcon::Coffee => "Coffee",
            CategoryIcon::Gamepad => "Gamepad",
            CategoryIcon::Music => "Music",
            CategoryIcon::Camera => "Camera",
        }
    }
}

/// Id-less template accepted by the category creation command.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryDraft {
    pub name: String,
    pub icon: CategoryIcon,
    pub color: String,
    pub kind: CategoryKind,
}

impl CategoryDraft {
    pub fn new(
        name: impl Into<String>,
        icon: CategoryIcon,
        color: impl Into<String>,
        kind: CategoryKind,
    ) -> Self {
        Self {
            name: name.into(),
            icon,
            color: color.into(),
            kind,
        }
    }
}

static DEFAULT_SET: Lazy<Vec<Category>> = Lazy::new(|| {
    vec![
        seeded(1, "Dining", CategoryIcon::Utensils, "#F87171", CategoryKind::Expense),
        seeded(2, "Shopping", CategoryIcon::ShoppingBag, "#818CF8", CategoryKind::Expense),
        seeded(3, "Transport", CategoryIcon::Car, "#34D399", CategoryKind::Expense),
        seeded(4, "Entertainment", CategoryIcon::Tv, "#FBBF24", CategoryKind::Expense),
        seeded(5, "Gym", CategoryIcon::Dumbbell, "#A78BFA", CategoryKind::Expense),
        seeded(6, "Health", CategoryIcon::HeartPulse, "#F472B6", CategoryKind::Expense),
        seeded(7, "Education", CategoryIcon::GraduationCap, "#60A5FA", CategoryKind::Expense),
        seeded(8, "Other", CategoryIcon::Wallet, "#94A3B8", CategoryKind::Both),
        seeded(9, "Salary", CategoryIcon::Wallet, "#10B981", CategoryKind::Income),
        seeded(10, "Savings", CategoryIcon::PiggyBank, "#F59E0B", CategoryKind::Expense),
    ]
});

fn seeded(id: u128, name: &str, icon: CategoryIcon, color: &str, kind: CategoryKind) -> Category {
    Category {
        id: Uuid::from_u128(id),
        name: name.to_string(),
        icon,
        color: color.to_string(),
        kind,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_set_contains_ten_entries_with_reserved_ids() {
        let defaults = Category::defaults();
        assert_eq!(defaults.len(), 10);
        assert!(defaults.iter().any(|c| c.id == OTHER_CATEGORY_ID));
        assert!(defaults.iter().any(|c| c.id == SAVINGS_CATEGORY_ID));
    }

    #[test]
    fn reserved_ids_are_protected() {
        assert!(Category::is_protected_id(OTHER_CATEGORY_ID));
        assert!(Category::is_protected_id(SAVINGS_CATEGORY_ID));
        assert!(!Category::is_protected_id(Uuid::from_u128(1)));
        assert!(!Category::is_protected_id(Uuid::new_v4()));
    }

    #[test]
    fn other_accepts_both_kinds_and_savings_is_an_expense() {
        let defaults = Category::defaults();
        let other = defaults
            .iter()
            .find(|c| c.id == OTHER_CATEGORY_ID)
            .expect("other present");
        let savings = defaults
            .iter()
            .find(|c| c.id == SAVINGS_CATEGORY_ID)
            .expect("savings present");
        assert_eq!(other.kind, CategoryKind::Both);
        assert_eq!(savings.kind, CategoryKind::Expense);
    }

    #[test]
    fn drafts_receive_fresh_ids() {
        let draft = CategoryDraft::new(
            "Pets",
            CategoryIcon::Home,
            COLOR_PALETTE[2],
            CategoryKind::Expense,
        );
        let a = Category::from_draft(draft.clone());
        let b = Category::from_draft(draft);
        assert_ne!(a.id, b.id);
        assert!(!a.is_protected());
    }
}
