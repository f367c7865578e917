/// Identifies where one recipe document lives: a category folder plus a
/// file slug. Recipes are never discovered dynamically; the registry below
/// is the complete list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecipeLocator {
    pub category: String,
    pub slug: String,
}

impl RecipeLocator {
    pub fn new(category: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            slug: slug.into(),
        }
    }

    /// Path of the document relative to the site root.
    pub fn rel_path(&self) -> String {
        format!("recipes/{}/{}.json", self.category, self.slug)
    }
}

// Recipe registry. Add new recipe files here (category folder, file slug).
const RECIPE_FILES: &[(&str, &str)] = &[
    ("beverages", "mango-lassi"),
    ("beverages", "masala-chai"),
    ("breads", "garlic-naan"),
    ("desserts", "chocolate-cake"),
    ("desserts", "vanilla-ice-cream"),
    ("gravy", "butter-chicken"),
    ("rice", "vegetable-biryani"),
    ("sauces", "tomato-sauce"),
];

pub fn registry() -> Vec<RecipeLocator> {
    RECIPE_FILES
        .iter()
        .map(|(category, slug)| RecipeLocator::new(*category, *slug))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::category_info;

    #[test]
    fn rel_path_layout() {
        let locator = RecipeLocator::new("beverages", "mango-lassi");
        assert_eq!(locator.rel_path(), "recipes/beverages/mango-lassi.json");
    }

    #[test]
    fn registry_references_known_categories() {
        for locator in registry() {
            assert!(
                category_info(&locator.category).is_some(),
                "unknown category in registry: {}",
                locator.category
            );
        }
    }
}
