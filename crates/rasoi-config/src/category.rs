use serde::Serialize;

/// Static category metadata. The site's category set is fixed at build
/// time and is not derived from whichever recipes happen to load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Category {
    pub id: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
    pub description: &'static str,
}

/// Declaration order here is the canonical category order everywhere.
pub const CATEGORIES: &[Category] = &[
    Category {
        id: "desserts",
        name: "Desserts",
        icon: "🍰",
        description: "Sweet treats and delights",
    },
    Category {
        id: "beverages",
        name: "Beverages",
        icon: "🥤",
        description: "Refreshing drinks",
    },
    Category {
        id: "gravy",
        name: "Gravy",
        icon: "🍛",
        description: "Rich and flavorful gravies",
    },
    Category {
        id: "rice",
        name: "Rice",
        icon: "🍚",
        description: "Rice-based dishes",
    },
    Category {
        id: "breads",
        name: "Breads",
        icon: "🥖",
        description: "Fresh baked breads",
    },
    Category {
        id: "sauces",
        name: "Sauces",
        icon: "🥫",
        description: "Delicious sauces and condiments",
    },
];

pub fn category_info(id: &str) -> Option<&'static Category> {
    CATEGORIES.iter().find(|c| c.id == id)
}
