//! Test utilities shared by the integration tests
//!
//! Provides the planets and socios datasets, a view type that handlers
//! render to, and assertion helpers.

#![allow(dead_code)]

use serde::Deserialize;
use std::rc::Rc;
use switchyard::*;

pub const PLANETS_JSON: &str = include_str!("../../data/planets.json");
pub const SOCIOS_JSON: &str = include_str!("../../data/socios.json");

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Planet {
    pub id: Option<u32>,
    pub planeta: String,
    pub description: Option<String>,
    pub img: Option<String>,
}

impl Record for Planet {
    type Id = u32;

    fn id(&self) -> Option<u32> {
        self.id
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Socio {
    pub id: u32,
    pub nombre: String,
    pub apellido: String,
    pub plan: String,
    pub estado: String,
}

impl Record for Socio {
    type Id = u32;

    fn id(&self) -> Option<u32> {
        Some(self.id)
    }
}

/// What a handler renders, standing in for a UI element tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Home,
    PlanetList(Vec<String>),
    PlanetDetail { id: u32, name: String },
    PlanetMissing { raw_id: String },
    Socios(usize),
    SocioDetail(String),
    NotFound,
}

pub fn planets() -> Rc<StaticRepository<Planet>> {
    Rc::new(StaticRepository::from_json(PLANETS_JSON).expect("planets fixture parses"))
}

pub fn socios() -> Rc<StaticRepository<Socio>> {
    Rc::new(StaticRepository::from_json(SOCIOS_JSON).expect("socios fixture parses"))
}

/// `/`, `/planets`, `/planeta/:id` and a 404 fallback.
pub fn planets_table() -> RouteTable<View> {
    let repo = planets();
    let list_repo = Rc::clone(&repo);

    RouteTable::builder()
        .route("/", |_| View::Home)
        .route("/planets", move |_| {
            View::PlanetList(list_repo.all().iter().map(|p| p.planeta.clone()).collect())
        })
        .named_route("planet", "/planeta/:id", move |params| {
            match lookup_param(repo.as_ref(), params, "id") {
                Lookup::Found(planet) => View::PlanetDetail {
                    id: planet.id.unwrap_or_default(),
                    name: planet.planeta.clone(),
                },
                Lookup::Missing => View::PlanetMissing {
                    raw_id: params.get("id").unwrap_or_default().to_string(),
                },
            }
        })
        .fallback(|_| View::NotFound)
        .build()
        .expect("planets routes are valid")
}

/// `/`, `/socios`, `/socios/:id` and a 404 fallback; a missing socio
/// renders the same 404 view from inside its handler.
pub fn socios_table() -> RouteTable<View> {
    let repo = socios();
    let list_repo = Rc::clone(&repo);

    RouteTable::builder()
        .route("/", |_| View::Home)
        .route("/socios", move |_| View::Socios(list_repo.len()))
        .route("/socios/:id", move |params| {
            lookup_param(repo.as_ref(), params, "id")
                .map(|s| View::SocioDetail(s.nombre.clone()))
                .found()
                .unwrap_or(View::NotFound)
        })
        .fallback(|_| View::NotFound)
        .build()
        .expect("socios routes are valid")
}

/// Assert that route parameters contain expected key-value pair
pub fn assert_param_equals(params: &RouteParams, key: &str, expected: &str) {
    let value = params.get(key);
    assert!(
        value.is_some(),
        "Parameter '{}' not found in RouteParams",
        key
    );
    assert_eq!(value, Some(expected), "Parameter '{}' has wrong value", key);
}

/// Create RouteParams with single key-value pair
pub fn params_with(key: &str, value: &str) -> RouteParams {
    RouteParams::from_pairs([(key, value)])
}
