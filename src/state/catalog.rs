//! In-memory product catalog
//!
//! Holds the two product collections and their identity counters. Records
//! live only for the lifetime of the process; restarting the server resets
//! the catalog to its seed data.

use serde::{Deserialize, Serialize};

/// A single catalog entry
///
/// Field names are the public JSON contract (`nome`, `descricao`, `preco`,
/// `imagem`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Identifier, unique within the product's category, assigned at creation
    pub id: String,
    /// Display name
    pub nome: String,
    /// Free-form description (may be empty)
    pub descricao: String,
    /// Price in the store currency
    pub preco: f64,
    /// Image reference: an upload-store path or an external URL
    pub imagem: String,
}

/// The two product categories served by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// Pizzas, listed under `/api/pizzas`
    Pizza,
    /// Beverages, listed under `/api/bebidas`
    Bebida,
}

impl Category {
    /// Resolve a category from its public plural path token
    ///
    /// Returns `None` for unknown tokens; callers reject those before
    /// touching the catalog.
    pub fn from_plural(token: &str) -> Option<Self> {
        match token {
            "pizzas" => Some(Category::Pizza),
            "bebidas" => Some(Category::Bebida),
            _ => None,
        }
    }
}

/// In-memory catalog: one ordered product collection and one identity
/// counter per category
#[derive(Debug)]
pub struct CatalogState {
    pizzas: Vec<Product>,
    bebidas: Vec<Product>,
    next_pizza_id: u64,
    next_bebida_id: u64,
}

impl CatalogState {
    /// Create the catalog pre-populated with the seed records
    ///
    /// The counters start past the seeded ids so freshly created products
    /// never collide with them.
    pub fn seeded() -> Self {
        Self {
            pizzas: vec![
                Product {
                    id: "1".to_string(),
                    nome: "Calabresa Tradicional".to_string(),
                    descricao: "Molho, mussarela, calabresa e cebola.".to_string(),
                    preco: 30.0,
                    imagem: "/uploads/placeholder-pizza.png".to_string(),
                },
                Product {
                    id: "2".to_string(),
                    nome: "Marguerita Especial".to_string(),
                    descricao: "Molho, mussarela, tomate e manjericão.".to_string(),
                    preco: 28.0,
                    imagem: "/uploads/placeholder-pizza.png".to_string(),
                },
            ],
            bebidas: vec![
                Product {
                    id: "101".to_string(),
                    nome: "Coca-Cola 2L".to_string(),
                    descricao: "Refrigerante".to_string(),
                    preco: 10.0,
                    imagem: "/uploads/placeholder-bebida.png".to_string(),
                },
                Product {
                    id: "102".to_string(),
                    nome: "Suco de Laranja 1L".to_string(),
                    descricao: "Natural".to_string(),
                    preco: 8.0,
                    imagem: "/uploads/placeholder-bebida.png".to_string(),
                },
            ],
            next_pizza_id: 3,
            next_bebida_id: 103,
        }
    }

    /// Products of a category, in insertion order
    pub fn products(&self, category: Category) -> &[Product] {
        match category {
            Category::Pizza => &self.pizzas,
            Category::Bebida => &self.bebidas,
        }
    }

    /// Mutable access to a category's collection
    pub fn products_mut(&mut self, category: Category) -> &mut Vec<Product> {
        match category {
            Category::Pizza => &mut self.pizzas,
            Category::Bebida => &mut self.bebidas,
        }
    }

    /// Assign the next identifier for a category
    ///
    /// Counters only move forward; ids are never reused, even after a
    /// delete.
    pub fn next_id(&mut self, category: Category) -> String {
        let counter = match category {
            Category::Pizza => &mut self.next_pizza_id,
            Category::Bebida => &mut self.next_bebida_id,
        };
        let id = *counter;
        *counter += 1;
        id.to_string()
    }

    /// Position of a product in its category's collection
    pub fn position(&self, category: Category, id: &str) -> Option<usize> {
        self.products(category).iter().position(|p| p.id == id)
    }
}
