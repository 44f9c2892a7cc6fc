//! Planets, socios, a cursor follower and a counter, rendered to the
//! terminal.
//!
//! Run with `RUST_LOG=debug cargo run --example planets` to see the
//! router's diagnostics next to each rendered view.

use serde::Deserialize;
use std::rc::Rc;
use switchyard::{
    lookup_param, HostSignal, LocationStore, Lookup, Record, Repository, RouteParams, RouteTable,
    Router, RouterConfig, StaticRepository, Store, Subscription,
};

#[derive(Debug, Deserialize)]
struct Planet {
    id: Option<u32>,
    planeta: String,
    description: Option<String>,
}

impl Record for Planet {
    type Id = u32;

    fn id(&self) -> Option<u32> {
        self.id
    }
}

#[derive(Debug, Deserialize)]
struct Socio {
    id: u32,
    nombre: String,
    apellido: String,
    plan: String,
    estado: String,
}

impl Record for Socio {
    type Id = u32;

    fn id(&self) -> Option<u32> {
        Some(self.id)
    }
}

fn planets_app(repo: Rc<StaticRepository<Planet>>) -> switchyard::Result<RouteTable<String>> {
    let list = Rc::clone(&repo);

    RouteTable::builder()
        .config(RouterConfig::default().cache_capacity(32))
        .route("/", |_| "Bienvenido al sistema solar".to_string())
        .route("/planets", move |_| {
            list.all()
                .iter()
                .map(|p| match p.id {
                    Some(id) => format!("  [{id}] {}", p.planeta),
                    None => format!("  [-] {}", p.planeta),
                })
                .collect::<Vec<_>>()
                .join("\n")
        })
        .named_route("planet", "/planeta/:id", move |params| {
            match lookup_param(repo.as_ref(), params, "id") {
                Lookup::Found(p) => format!(
                    "{}\n  {}",
                    p.planeta,
                    p.description.as_deref().unwrap_or("Sin descripción")
                ),
                Lookup::Missing => format!(
                    "Planeta '{}' no encontrado",
                    params.get("id").unwrap_or_default()
                ),
            }
        })
        .fallback(|_| "404 - Not Found".to_string())
        .build()
}

fn socios_app(repo: Rc<StaticRepository<Socio>>) -> switchyard::Result<RouteTable<String>> {
    let list = Rc::clone(&repo);

    RouteTable::builder()
        .route("/socios", move |_| {
            list.iter()
                .map(|s| format!("  {} {} ({}, {})", s.nombre, s.apellido, s.plan, s.estado))
                .collect::<Vec<_>>()
                .join("\n")
        })
        .route("/socios/:id", move |params| {
            lookup_param(repo.as_ref(), params, "id")
                .map(|s| format!("Socio #{}: {} {}", s.id, s.nombre, s.apellido))
                .found()
                .unwrap_or_else(|| "404 - Socio no encontrado".to_string())
        })
        .fallback(|_| "404 - Not Found".to_string())
        .build()
}

fn show(router: &Router<String>) {
    let location = router.location().current();
    match router.render() {
        Ok(view) => println!("── {} ──\n{}\n", location, view),
        Err(err) => println!("── {} ──\n(error: {})\n", location, err),
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Point {
    x: i32,
    y: i32,
}

/// A dot that tracks the pointer only while following is switched on.
fn follow_cursor() {
    let pointer = Store::new(Point::default());
    let dot = Store::new(Point::default());
    let mut follower: Option<Subscription> = None;

    let moves = [(10, 10), (25, 40), (80, 15), (120, 90)];
    for (step, (x, y)) in moves.into_iter().enumerate() {
        if step == 1 {
            let dot = dot.clone();
            follower = Some(pointer.subscribe(move |p| dot.set(*p)));
        }
        if step == 3 {
            if let Some(sub) = follower.take() {
                sub.unsubscribe();
            }
        }
        pointer.set(Point { x, y });
        let at = dot.get();
        println!(
            "pointer ({x}, {y}) -> dot translate({}px, {}px)",
            at.x, at.y
        );
    }
    println!();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let planets: Rc<StaticRepository<Planet>> = Rc::new(StaticRepository::from_json(
        include_str!("../data/planets.json"),
    )?);
    let socios: Rc<StaticRepository<Socio>> = Rc::new(StaticRepository::from_json(
        include_str!("../data/socios.json"),
    )?);

    let location = LocationStore::create("/");
    let router = Router::mount(&location, planets_app(Rc::clone(&planets))?);
    let _log = router.on_change(|state| log::info!("route state: {:?}", state));

    show(&router);
    for href in ["/planets", "/planeta/3", "/planeta/99", "/pluto"] {
        router.navigate(href);
        show(&router);
    }

    location.handle_host_signal(HostSignal::Back);
    show(&router);

    if let Some(href) = router.table().url_for("planet", &RouteParams::from_pairs([("id", "5")])) {
        router.navigate(&href);
        show(&router);
    }

    if let Some(stats) = router.table().cache_stats() {
        println!("cache: {} hits, {} misses", stats.hits, stats.misses);
    }
    router.dispose();

    let socios_router = Router::mount(&location, socios_app(socios)?);
    for href in ["/socios", "/socios/2", "/socios/42"] {
        socios_router.navigate(href);
        show(&socios_router);
    }

    follow_cursor();

    let counter = Store::new(0_i64);
    let _view = counter.subscribe(|n| println!("Count: {n}"));
    counter.update(|n| *n += 1);
    counter.update(|n| *n += 1);
    counter.update(|n| *n -= 1);
    counter.set(0);

    Ok(())
}
