// tests/support/builders.rs
use serde_json::json;
use tabletop_catalog::domain::catalog::{
    AuthorFields, EditionFields, GameFields, GameSystemFields, ProductFields, PublisherFields,
};
use uuid::Uuid;

pub fn game(title: &str) -> GameFields {
    GameFields {
        title: title.into(),
        img: None,
        url: None,
    }
}

pub fn author(first_name: &str, last_name: &str) -> AuthorFields {
    AuthorFields {
        last_name: last_name.into(),
        first_name: first_name.into(),
        display_name: None,
        deadname: false,
    }
}

pub fn publisher(name: &str) -> PublisherFields {
    serde_json::from_value(json!({ "name": name })).expect("publisher fields")
}

pub fn system(title: &str) -> GameSystemFields {
    serde_json::from_value(json!({
        "title": title,
        "primary_resolution_mechanic": "dice",
    }))
    .expect("system fields")
}

pub fn edition(identifier: &str) -> EditionFields {
    serde_json::from_value(json!({
        "game_id": Uuid::new_v4(),
        "system_id": Uuid::new_v4(),
        "publisher_id": Uuid::new_v4(),
        "edition_identifier": identifier,
    }))
    .expect("edition fields")
}

pub fn product(title: &str) -> ProductFields {
    serde_json::from_value(json!({
        "edition_id": Uuid::new_v4(),
        "title": title,
        "product_type": "book",
    }))
    .expect("product fields")
}
