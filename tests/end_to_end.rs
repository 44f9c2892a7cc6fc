//! End-to-end tests for the two sample applications
//!
//! A [`Router`] is mounted over a [`LocationStore`] and driven by
//! navigation, the way a UI shell would drive it.

mod common;

use common::*;
use std::cell::RefCell;
use std::rc::Rc;
use switchyard::*;

#[test]
fn test_planets_app_initial_render() {
    let location = LocationStore::create("/");
    let router = Router::mount(&location, planets_table());

    assert_eq!(router.render().unwrap(), View::Home);
    assert!(router.state().is_resolved());
}

#[test]
fn test_planets_app_detail() {
    let location = LocationStore::create("/");
    let router = Router::mount(&location, planets_table());

    location.navigate("/planeta/3");

    assert_eq!(
        router.state(),
        RouteState::Resolved {
            index: 2,
            params: params_with("id", "3"),
        }
    );
    assert_eq!(
        router.render().unwrap(),
        View::PlanetDetail {
            id: 3,
            name: "Tierra".into()
        }
    );
}

#[test]
fn test_unknown_planet_is_handled_by_detail_view() {
    let location = LocationStore::create("/planeta/99");
    let router = Router::mount(&location, planets_table());

    assert!(router.state().is_resolved(), "route matched, record did not");
    assert_eq!(
        router.render().unwrap(),
        View::PlanetMissing {
            raw_id: "99".into()
        }
    );
}

#[test]
fn test_planet_without_id_is_listed_but_not_addressable() {
    let location = LocationStore::create("/planets");
    let router = Router::mount(&location, planets_table());

    match router.render().unwrap() {
        View::PlanetList(names) => assert!(names.contains(&"Mercurio".to_string())),
        other => panic!("expected planet list, got {other:?}"),
    }

    location.navigate("/planeta/1");
    assert!(matches!(router.render().unwrap(), View::PlanetMissing { .. }));
}

#[test]
fn test_unknown_path_renders_not_found() {
    let location = LocationStore::create("/");
    let router = Router::mount(&location, planets_table());

    location.navigate("/xyz");

    assert_eq!(router.state(), RouteState::NotFound { path: "/xyz".into() });
    assert_eq!(router.render().unwrap(), View::NotFound);
    assert!(router.params().is_empty());
}

#[test]
fn test_browsing_session_with_back_button() {
    let location = LocationStore::create("/");
    let router = Router::mount(&location, planets_table());
    let rendered = Rc::new(RefCell::new(Vec::new()));

    let sink = Rc::clone(&rendered);
    let _sub = router.on_change(move |state| sink.borrow_mut().push(state.clone()));

    router.navigate("/planets");
    router.navigate("/planeta/4");
    location.handle_host_signal(HostSignal::Back);

    assert_eq!(router.render().unwrap(), View::PlanetList(all_planet_names()));

    let states = rendered.borrow();
    assert_eq!(states.len(), 3);
    assert_eq!(
        states[1],
        RouteState::Resolved {
            index: 2,
            params: params_with("id", "4"),
        }
    );
    assert!(states[2].is_resolved());
}

#[test]
fn test_link_built_from_named_route() {
    let location = LocationStore::create("/planets");
    let router = Router::mount(&location, planets_table());

    let href = router
        .table()
        .url_for("planet", &params_with("id", "5"))
        .unwrap();
    router.navigate(&href);

    assert_eq!(
        router.render().unwrap(),
        View::PlanetDetail {
            id: 5,
            name: "Jupiter".into()
        }
    );
}

#[test]
fn test_socios_app() {
    let location = LocationStore::create("/");
    let router = Router::mount(&location, socios_table());

    location.navigate("/socios");
    assert_eq!(router.render().unwrap(), View::Socios(5));

    location.navigate("/socios/4");
    assert_eq!(router.render().unwrap(), View::SocioDetail("Diego".into()));

    location.navigate("/socios/42");
    assert!(router.state().is_resolved());
    assert_eq!(router.render().unwrap(), View::NotFound);

    location.navigate("/socios/4/pagos");
    assert!(router.state().is_not_found());
}

#[test]
fn test_socios_filtered_by_query() {
    let repo = socios();
    let location = LocationStore::create("/socios?estado=ACT");

    let estado = location.current().query().get("estado").map(str::to_string);
    let active: Vec<_> = repo
        .iter()
        .filter(|s| Some(&s.estado) == estado.as_ref())
        .map(|s| s.id)
        .collect();

    assert_eq!(active, vec![1, 2, 4]);
}

#[test]
fn test_two_routers_share_one_location() {
    let location = LocationStore::create("/");
    let planets = Router::mount(&location, planets_table());
    let socios = Router::mount(&location, socios_table());

    location.navigate("/socios/1");

    assert!(planets.state().is_not_found());
    assert_eq!(socios.render().unwrap(), View::SocioDetail("Lucía".into()));

    planets.dispose();
    assert_eq!(location.subscriber_count(), 1);
}

fn all_planet_names() -> Vec<String> {
    planets().all().iter().map(|p| p.planeta.clone()).collect()
}
