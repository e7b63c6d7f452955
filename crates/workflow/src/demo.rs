//! Sample payloads used by the guided workflow and the interactive menu.

use crate::config::DEFAULT_CONTRACT_ADDRESS;
use documents::{CategoryRating, EventMetadata, MerchItem, ProofOfFunResults};
use std::collections::BTreeMap;

/// Categories attendees rate at every event
pub const RATING_CATEGORIES: [&str; 6] = [
    "Ambience",
    "Organization",
    "Content",
    "Technology",
    "Entertainment",
    "Accessibility",
];

pub fn demo_event() -> EventMetadata {
    EventMetadata {
        id: 1,
        name: "ETH Global Buenos Aires 2025".to_string(),
        description: "Hackathon internacional de Ethereum".to_string(),
        location: "Buenos Aires, Argentina".to_string(),
        start_date: "2025-11-20".to_string(),
        end_date: "2025-11-23".to_string(),
        categories: RATING_CATEGORIES.iter().map(|c| c.to_string()).collect(),
        contract_address: DEFAULT_CONTRACT_ADDRESS.to_string(),
    }
}

pub fn demo_results() -> ProofOfFunResults {
    let ratings: [(&str, f64, [u64; 5]); 6] = [
        ("Ambience", 4.5, [5, 15, 40, 120, 170]),
        ("Organization", 4.7, [3, 10, 30, 107, 200]),
        ("Content", 4.3, [8, 20, 50, 140, 132]),
        ("Technology", 4.6, [4, 12, 35, 110, 189]),
        ("Entertainment", 4.4, [6, 18, 45, 125, 156]),
        ("Accessibility", 4.2, [10, 22, 55, 135, 128]),
    ];

    let mut category_ratings = BTreeMap::new();
    for (category, average, counts) in ratings {
        let mut distribution = BTreeMap::new();
        for (stars, count) in counts.iter().enumerate() {
            distribution.insert((stars + 1).to_string(), *count);
        }
        category_ratings.insert(
            category.to_string(),
            CategoryRating {
                average,
                total_votes: 350,
                distribution,
            },
        );
    }

    ProofOfFunResults {
        event_name: "ETH Global Buenos Aires 2025".to_string(),
        total_votes: 350,
        total_attendees: 450,
        participation_rate: 77.8,
        category_ratings,
        overall_rating: 4.5,
        verified_on_chain: true,
    }
}

pub fn demo_catalog() -> Vec<MerchItem> {
    vec![
        MerchItem {
            id: 1,
            name: "ETH Global T-Shirt".to_string(),
            description: "Limited edition hackathon t-shirt".to_string(),
            token_price: 150,
            stock: 100,
            sizes: Some(vec![
                "S".to_string(),
                "M".to_string(),
                "L".to_string(),
                "XL".to_string(),
            ]),
            category: "clothing".to_string(),
        },
        MerchItem {
            id: 2,
            name: "ETH Cap".to_string(),
            description: "Baseball cap with ETH logo".to_string(),
            token_price: 100,
            stock: 50,
            sizes: None,
            category: "accessories".to_string(),
        },
        MerchItem {
            id: 3,
            name: "Sticker Pack".to_string(),
            description: "5 exclusive stickers".to_string(),
            token_price: 50,
            stock: 200,
            sizes: None,
            category: "accessories".to_string(),
        },
        MerchItem {
            id: 4,
            name: "Laptop Sleeve".to_string(),
            description: "Protective laptop sleeve with ETH branding".to_string(),
            token_price: 200,
            stock: 30,
            sizes: None,
            category: "tech".to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use documents::Document;

    #[test]
    fn test_demo_event_covers_all_categories() {
        let event = demo_event();
        assert_eq!(event.categories.len(), RATING_CATEGORIES.len());
        assert_eq!(event.id, 1);
    }

    #[test]
    fn test_demo_results_are_consistent() {
        let results = demo_results();
        assert_eq!(results.category_ratings.len(), 6);
        for (category, rating) in &results.category_ratings {
            let counted: u64 = rating.distribution.values().sum();
            assert_eq!(counted, rating.total_votes, "bad counts for {}", category);
        }
    }

    #[test]
    fn test_demo_payloads_encode() {
        let event = Document::event(demo_event());
        let catalog = Document::merch(demo_catalog());
        assert!(event.encode().is_ok());
        assert!(catalog.encode().is_ok());
        assert_eq!(demo_catalog().len(), 4);
    }
}
