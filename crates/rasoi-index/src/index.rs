use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::OnceCell;
use tokio::task::JoinSet;

use rasoi_config::{CATEGORIES, Category, RecipeLocator, category_info};
use rasoi_types::Recipe;

use crate::source::RecipeSource;

/// The loaded collection: recipes in the order their fetches settled,
/// with an id side index for point lookups.
#[derive(Default)]
pub struct RecipeSet {
    entries: Vec<Recipe>,
    by_id: HashMap<String, usize>,
}

impl RecipeSet {
    /// Keyed by the payload's declared id, not its source path. A second
    /// recipe declaring an already-seen id replaces the first in place.
    fn insert(&mut self, recipe: Recipe) {
        match self.by_id.get(&recipe.id) {
            Some(&idx) => {
                tracing::warn!(id = %recipe.id, "duplicate recipe id, replacing earlier entry");
                self.entries[idx] = recipe;
            }
            None => {
                self.by_id.insert(recipe.id.clone(), self.entries.len());
                self.entries.push(recipe);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get_by_id(&self, id: &str) -> Option<&Recipe> {
        self.by_id.get(id).map(|&idx| &self.entries[idx])
    }

    pub fn all(&self) -> impl Iterator<Item = &Recipe> {
        self.entries.iter()
    }

    pub fn by_category(&self, category: &str) -> Vec<&Recipe> {
        self.entries
            .iter()
            .filter(|r| r.category == category)
            .collect()
    }

    pub fn featured(&self) -> Vec<&Recipe> {
        self.entries.iter().filter(|r| r.featured).collect()
    }

    /// Case-insensitive substring match against title, description, or any
    /// ingredient. An empty query matches every recipe.
    pub fn search(&self, query: &str) -> Vec<&Recipe> {
        let needle = query.to_lowercase();
        self.entries
            .iter()
            .filter(|r| {
                r.title.to_lowercase().contains(&needle)
                    || r.description.to_lowercase().contains(&needle)
                    || r.ingredients
                        .iter()
                        .any(|ing| ing.to_lowercase().contains(&needle))
            })
            .collect()
    }
}

/// One static category annotated with how many loaded recipes it holds.
#[derive(Debug, Clone, Copy)]
pub struct CategoryCount {
    pub category: &'static Category,
    pub count: usize,
}

/// Process-lifetime recipe index: empty until `load_all`, populated and
/// immutable afterwards. Overlapping `load_all` calls share one in-flight
/// load; each registry entry is fetched at most once, ever.
pub struct RecipeIndex {
    source: Arc<dyn RecipeSource>,
    registry: Vec<RecipeLocator>,
    loaded: OnceCell<RecipeSet>,
}

impl RecipeIndex {
    pub fn new(source: impl RecipeSource + 'static, registry: Vec<RecipeLocator>) -> Self {
        Self {
            source: Arc::new(source),
            registry,
            loaded: OnceCell::new(),
        }
    }

    /// Fetch every registered recipe in parallel and wait for all of them
    /// to settle. A failed document is logged and skipped; it never aborts
    /// the load or delays its siblings. Zero loaded recipes is an empty
    /// set, not an error.
    pub async fn load_all(&self) -> &RecipeSet {
        self.loaded
            .get_or_init(|| async {
                let mut tasks = JoinSet::new();
                for locator in self.registry.iter().cloned() {
                    let source = Arc::clone(&self.source);
                    tasks.spawn(async move {
                        let result = source.fetch(&locator).await;
                        (locator, result)
                    });
                }

                let mut set = RecipeSet::default();
                while let Some(joined) = tasks.join_next().await {
                    match joined {
                        Ok((_, Ok(recipe))) => set.insert(recipe),
                        Ok((locator, Err(e))) => {
                            tracing::error!(path = %locator.rel_path(), error = %e, "failed to load recipe");
                        }
                        Err(e) => {
                            tracing::error!(error = %e, "recipe fetch task panicked");
                        }
                    }
                }

                tracing::info!(count = set.len(), "recipe index loaded");
                set
            })
            .await
    }

    fn set(&self) -> Option<&RecipeSet> {
        self.loaded.get()
    }

    pub fn get_by_id(&self, id: &str) -> Option<&Recipe> {
        self.set().and_then(|s| s.get_by_id(id))
    }

    pub fn get_all(&self) -> Vec<&Recipe> {
        self.set().map(|s| s.all().collect()).unwrap_or_default()
    }

    pub fn get_by_category(&self, category: &str) -> Vec<&Recipe> {
        self.set().map(|s| s.by_category(category)).unwrap_or_default()
    }

    pub fn get_featured(&self) -> Vec<&Recipe> {
        self.set().map(|s| s.featured()).unwrap_or_default()
    }

    pub fn search(&self, query: &str) -> Vec<&Recipe> {
        self.set().map(|s| s.search(query)).unwrap_or_default()
    }

    pub fn category_info(&self, id: &str) -> Option<&'static Category> {
        category_info(id)
    }

    /// One row per statically declared category, in declaration order,
    /// including categories with zero loaded recipes.
    pub fn categories_with_counts(&self) -> Vec<CategoryCount> {
        CATEGORIES
            .iter()
            .map(|category| CategoryCount {
                category,
                count: self.get_by_category(category.id).len(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use rasoi_config::registry;

    use super::*;
    use crate::error::FetchError;

    /// In-memory source keyed by relative path, with failure injection and
    /// a fetch counter.
    struct MemorySource {
        documents: HashMap<String, String>,
        fetches: AtomicUsize,
    }

    impl MemorySource {
        fn new(documents: &[(&str, &str)]) -> Self {
            Self {
                documents: documents
                    .iter()
                    .map(|(path, body)| (path.to_string(), body.to_string()))
                    .collect(),
                fetches: AtomicUsize::new(0),
            }
        }

        fn fetch_count(&self) -> usize {
            self.fetches.load(Ordering::SeqCst)
        }
    }

    #[async_trait::async_trait]
    impl RecipeSource for MemorySource {
        async fn fetch(&self, locator: &RecipeLocator) -> Result<Recipe, FetchError> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            let path = locator.rel_path();
            match self.documents.get(&path) {
                Some(body) => Ok(serde_json::from_str(body)?),
                None => Err(FetchError::Status { path, status: 404 }),
            }
        }
    }

    fn document(id: &str, category: &str, featured: bool) -> String {
        format!(
            r#"{{
                "id": "{id}",
                "category": "{category}",
                "title": "{id} title",
                "description": "a {category} dish",
                "prepTime": "10 mins",
                "cookTime": "20 mins",
                "servings": "4 servings",
                "ingredients": ["onion", "salt"],
                "instructions": ["chop", "cook"],
                "featured": {featured}
            }}"#
        )
    }

    fn beverages_fixture() -> MemorySource {
        MemorySource::new(&[
            (
                "recipes/beverages/mango-lassi.json",
                &document("mango-lassi", "beverages", true),
            ),
            (
                "recipes/beverages/masala-chai.json",
                &document("masala-chai", "beverages", false),
            ),
        ])
    }

    fn beverages_registry() -> Vec<RecipeLocator> {
        vec![
            RecipeLocator::new("beverages", "mango-lassi"),
            RecipeLocator::new("beverages", "masala-chai"),
        ]
    }

    #[tokio::test]
    async fn lookup_returns_recipe_with_queried_id() {
        let index = RecipeIndex::new(beverages_fixture(), beverages_registry());
        let set = index.load_all().await;

        for recipe in set.all() {
            let found = index.get_by_id(&recipe.id).unwrap();
            assert_eq!(found.id, recipe.id);
        }
        assert!(index.get_by_id("no-such-recipe").is_none());
    }

    #[tokio::test]
    async fn featured_and_category_queries() {
        let index = RecipeIndex::new(beverages_fixture(), beverages_registry());
        index.load_all().await;

        let featured: Vec<_> = index.get_featured().iter().map(|r| r.id.clone()).collect();
        assert_eq!(featured, vec!["mango-lassi"]);

        let beverages = index.get_by_category("beverages");
        assert_eq!(beverages.len(), 2);
        assert!(index.get_by_category("rice").is_empty());
    }

    #[tokio::test]
    async fn category_partition_covers_all_recipes() {
        let index = RecipeIndex::new(
            MemorySource::new(&[
                (
                    "recipes/beverages/mango-lassi.json",
                    &document("mango-lassi", "beverages", true),
                ),
                (
                    "recipes/rice/vegetable-biryani.json",
                    &document("vegetable-biryani", "rice", false),
                ),
                (
                    "recipes/breads/garlic-naan.json",
                    &document("garlic-naan", "breads", false),
                ),
            ]),
            vec![
                RecipeLocator::new("beverages", "mango-lassi"),
                RecipeLocator::new("rice", "vegetable-biryani"),
                RecipeLocator::new("breads", "garlic-naan"),
            ],
        );
        index.load_all().await;

        let counts = index.categories_with_counts();
        assert_eq!(counts.len(), CATEGORIES.len());
        for row in &counts {
            assert_eq!(row.count, index.get_by_category(row.category.id).len());
        }
        let total: usize = counts.iter().map(|row| row.count).sum();
        assert_eq!(total, index.get_all().len());
        assert!(counts.iter().any(|row| row.count == 0));
    }

    #[tokio::test]
    async fn search_is_case_insensitive_and_covers_ingredients() {
        let index = RecipeIndex::new(beverages_fixture(), beverages_registry());
        index.load_all().await;

        let upper: Vec<_> = index.search("MANGO").iter().map(|r| r.id.clone()).collect();
        let lower: Vec<_> = index.search("mango").iter().map(|r| r.id.clone()).collect();
        assert_eq!(upper, lower);
        assert_eq!(upper, vec!["mango-lassi"]);

        // matches an ingredient string, not just titles
        assert_eq!(index.search("onion").len(), 2);
        assert!(index.search("saffron").is_empty());
    }

    #[tokio::test]
    async fn empty_query_matches_everything() {
        let index = RecipeIndex::new(beverages_fixture(), beverages_registry());
        index.load_all().await;
        assert_eq!(index.search("").len(), index.get_all().len());
    }

    #[tokio::test]
    async fn concurrent_loads_share_one_fetch_pass() {
        let source = beverages_fixture();
        let index = Arc::new(RecipeIndex::new(source, beverages_registry()));

        let a = Arc::clone(&index);
        let b = Arc::clone(&index);
        let (first, second) = tokio::join!(
            async move { a.load_all().await.len() },
            async move { b.load_all().await.len() },
        );
        assert_eq!(first, second);
        assert_eq!(first, 2);

        let ids: Vec<_> = index.get_all().iter().map(|r| r.id.clone()).collect();
        assert_eq!(ids.len(), 2);
    }

    #[tokio::test]
    async fn one_failed_fetch_skips_one_item_only() {
        let index = RecipeIndex::new(
            beverages_fixture(),
            vec![
                RecipeLocator::new("beverages", "mango-lassi"),
                RecipeLocator::new("beverages", "masala-chai"),
                RecipeLocator::new("rice", "vegetable-biryani"), // 404s
            ],
        );
        let set = index.load_all().await;
        assert_eq!(set.len(), 2);
        assert!(index.get_by_id("vegetable-biryani").is_none());
    }

    #[tokio::test]
    async fn malformed_document_is_skipped() {
        let index = RecipeIndex::new(
            MemorySource::new(&[
                ("recipes/sauces/tomato-sauce.json", "{not json"),
                (
                    "recipes/beverages/mango-lassi.json",
                    &document("mango-lassi", "beverages", false),
                ),
            ]),
            vec![
                RecipeLocator::new("sauces", "tomato-sauce"),
                RecipeLocator::new("beverages", "mango-lassi"),
            ],
        );
        let set = index.load_all().await;
        assert_eq!(set.len(), 1);
        assert!(index.get_by_id("mango-lassi").is_some());
    }

    #[tokio::test]
    async fn zero_loaded_recipes_is_an_empty_set() {
        let index = RecipeIndex::new(
            MemorySource::new(&[]),
            vec![RecipeLocator::new("rice", "vegetable-biryani")],
        );
        let set = index.load_all().await;
        assert!(set.is_empty());
        assert!(index.get_all().is_empty());
    }

    #[tokio::test]
    async fn duplicate_id_later_settle_wins() {
        // two registry entries whose payloads declare the same id
        let mut chai_as_lassi = document("mango-lassi", "beverages", false);
        chai_as_lassi = chai_as_lassi.replace("a beverages dish", "impostor");
        let index = RecipeIndex::new(
            MemorySource::new(&[
                (
                    "recipes/beverages/mango-lassi.json",
                    &document("mango-lassi", "beverages", true),
                ),
                ("recipes/beverages/masala-chai.json", &chai_as_lassi),
            ]),
            vec![
                RecipeLocator::new("beverages", "mango-lassi"),
                RecipeLocator::new("beverages", "masala-chai"),
            ],
        );
        let set = index.load_all().await;
        assert_eq!(set.len(), 1);
        // whichever settled last is the one stored; both declare this id
        assert!(index.get_by_id("mango-lassi").is_some());
    }

    #[tokio::test]
    async fn queries_before_load_observe_the_empty_state() {
        let index = RecipeIndex::new(beverages_fixture(), beverages_registry());
        assert!(index.get_all().is_empty());
        assert!(index.get_by_id("mango-lassi").is_none());
        assert!(index.search("mango").is_empty());
        assert!(
            index
                .categories_with_counts()
                .iter()
                .all(|row| row.count == 0)
        );
    }

    #[tokio::test]
    async fn exactly_one_fetch_per_registry_entry() {
        let registry = beverages_registry();
        let expected = registry.len();
        let source = Arc::new(beverages_fixture());
        let counting = Arc::clone(&source);

        struct Shared(Arc<MemorySource>);

        #[async_trait::async_trait]
        impl RecipeSource for Shared {
            async fn fetch(&self, locator: &RecipeLocator) -> Result<Recipe, FetchError> {
                self.0.fetch(locator).await
            }
        }

        let index = Arc::new(RecipeIndex::new(Shared(source), registry));
        let a = Arc::clone(&index);
        let b = Arc::clone(&index);
        tokio::join!(
            async move { a.load_all().await.len() },
            async move { b.load_all().await.len() },
        );
        index.load_all().await;

        assert_eq!(counting.fetch_count(), expected);
    }

    #[test]
    fn default_registry_loads_against_static_list() {
        // the shipped registry resolves to the expected site layout
        let paths: Vec<_> = registry().iter().map(|l| l.rel_path()).collect();
        assert!(paths.contains(&"recipes/gravy/butter-chicken.json".to_string()));
        assert_eq!(paths.len(), 8);
    }
}
