use crate::model::{Category, Customization, CustomizationKind, MenuItem, SeedData};

fn menu_item(
    name: &str,
    description: &str,
    image_url: &str,
    price: f64,
    rating: f64,
    calories: u32,
    protein: u32,
    category_name: &str,
    customizations: &[&str],
) -> MenuItem {
    MenuItem {
        name: name.to_string(),
        description: description.to_string(),
        image_url: image_url.to_string(),
        price,
        rating,
        calories,
        protein,
        category_name: category_name.to_string(),
        customizations: customizations.iter().map(|s| s.to_string()).collect(),
    }
}

/// Built-in source dataset used when no dataset file is configured.
pub fn default_dataset() -> SeedData {
    SeedData {
        categories: vec![
            Category::new("Pizza", "Stone-baked pies with fresh toppings"),
            Category::new("Burgers", "Flame-grilled patties on brioche buns"),
            Category::new("Salads", "Crisp greens and seasonal vegetables"),
        ],
        customizations: vec![
            Customization::new("Extra Cheese", 1.5, CustomizationKind::Topping),
            Customization::new("Mushrooms", 1.0, CustomizationKind::Topping),
            Customization::new("Bacon", 2.0, CustomizationKind::Topping),
            Customization::new("Fries", 2.5, CustomizationKind::Side),
            Customization::new("Large", 3.0, CustomizationKind::Size),
            Customization::new("Thin Crust", 0.0, CustomizationKind::Crust),
            Customization::new("Garlic Dip", 0.8, CustomizationKind::Other("sauce".to_string())),
        ],
        menu: vec![
            menu_item(
                "Margherita",
                "Tomato, mozzarella, and fresh basil",
                "https://cdn.example.com/img/margherita.png",
                9.5,
                4.6,
                850,
                32,
                "Pizza",
                &["Extra Cheese", "Thin Crust", "Garlic Dip"],
            ),
            menu_item(
                "Pepperoni",
                "Double pepperoni with oregano",
                "https://cdn.example.com/img/pepperoni.png",
                11.0,
                4.8,
                980,
                41,
                "Pizza",
                &["Extra Cheese", "Mushrooms", "Large"],
            ),
            menu_item(
                "Classic Cheeseburger",
                "Beef patty, cheddar, pickles, house sauce",
                "https://cdn.example.com/img/classic-cheeseburger.png",
                8.0,
                4.4,
                760,
                38,
                "Burgers",
                &["Bacon", "Fries", "Extra Cheese"],
            ),
            menu_item(
                "Smoky BBQ Burger",
                "Smoked brisket patty with BBQ glaze",
                "https://cdn.example.com/img/smoky-bbq-burger.png",
                9.0,
                4.7,
                820,
                44,
                "Burgers",
                &["Bacon", "Fries"],
            ),
            menu_item(
                "Caesar Salad",
                "Romaine, parmesan, croutons, caesar dressing",
                "https://cdn.example.com/img/caesar-salad.png",
                7.0,
                4.2,
                420,
                18,
                "Salads",
                &["Bacon"],
            ),
        ],
    }
}
