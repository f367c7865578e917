use anyhow::Result;
use rasoi_index::RecipeIndex;
use rasoi_types::Recipe;

use crate::Command;

pub async fn run(command: &Command, index: &RecipeIndex) -> Result<()> {
    let set = index.load_all().await;
    if set.is_empty() {
        tracing::warn!("no recipes loaded; is the recipe source reachable?");
    }

    match command {
        Command::List { category } => {
            let recipes = match category {
                Some(category) => index.get_by_category(category),
                None => index.get_all(),
            };
            print_listing(&recipes);
        }
        Command::Show { id } => match index.get_by_id(id) {
            Some(recipe) => print_recipe(index, recipe),
            None => anyhow::bail!("no recipe with id '{id}'"),
        },
        Command::Search { query } => print_listing(&index.search(query)),
        Command::Featured => print_listing(&index.get_featured()),
        Command::Categories => {
            for row in index.categories_with_counts() {
                println!(
                    "{} {:<10} {:>3}  {}",
                    row.category.icon, row.category.name, row.count, row.category.description
                );
            }
        }
        Command::Validate { .. } => unreachable!("handled before the index loads"),
    }

    Ok(())
}

fn print_listing(recipes: &[&Recipe]) {
    for recipe in recipes {
        println!("{:<22} {:<10} {}", recipe.id, recipe.category, recipe.title);
    }
}

fn print_recipe(index: &RecipeIndex, recipe: &Recipe) {
    let category = index
        .category_info(&recipe.category)
        .map(|c| c.name)
        .unwrap_or(recipe.category.as_str());

    println!("{} ({category})", recipe.title);
    println!("{}", recipe.description);
    println!();
    println!(
        "prep {} | cook {} | {}",
        recipe.prep_time, recipe.cook_time, recipe.servings
    );

    println!("\nIngredients:");
    for ingredient in &recipe.ingredients {
        println!("  - {ingredient}");
    }

    println!("\nInstructions:");
    for (i, step) in recipe.instructions.iter().enumerate() {
        println!("  {}. {step}", i + 1);
    }

    if let Some(notes) = &recipe.notes {
        println!("\nNotes: {notes}");
    }

    if !recipe.videos.is_empty() {
        println!("\nVideos:");
        for video in &recipe.videos {
            let title = video.title().unwrap_or("Video Tutorial");
            match video {
                rasoi_types::Video::Youtube { id, .. } => {
                    println!("  {title}: https://www.youtube.com/watch?v={id}");
                }
                rasoi_types::Video::Instagram { url, .. } => {
                    println!("  {title}: {url}");
                }
            }
        }
    }

    if !recipe.references.is_empty() {
        println!("\nReferences:");
        for reference in &recipe.references {
            println!("  {}: {}", reference.title, reference.url);
        }
    }
}
