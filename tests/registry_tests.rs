//! Process-wide network selection
//!
//! The selection is global to the test binary, so the whole lifecycle runs
//! in one test.

use ds_core::chain::{params, registry, select_params, try_params, Network};
use ds_core::crypto::{Hash, Sha256dHasher};
use ds_core::ParamsError;

/// Answers with the expected genesis hash for the one header it knows
fn known_genesis() -> impl Fn(&[u8]) -> Hash {
    let main = registry().unwrap().get(Network::Main);
    let header = main.genesis.header.to_bytes();
    let hash = *main.genesis_hash();
    move |bytes: &[u8]| if bytes == &header[..] { hash } else { Hash::zero() }
}

#[test]
fn test_selection_lifecycle() {
    let pow = known_genesis();

    // nothing published until a selection succeeds
    assert!(try_params().is_none());
    assert_eq!(
        select_params("bogus", &pow).unwrap_err(),
        ParamsError::UnknownNetwork("bogus".into())
    );
    assert!(matches!(
        select_params("main", &Sha256dHasher),
        Err(ParamsError::GenesisMismatch { field: "hash", .. })
    ));
    assert!(try_params().is_none());

    let selected = select_params("main", &pow).unwrap();
    assert_eq!(selected.network, Network::Main);
    assert!(std::ptr::eq(params(), selected));
    assert_eq!(params().default_port, 11226);

    // same network again is a no-op
    let again = select_params("main", &pow).unwrap();
    assert!(std::ptr::eq(again, selected));

    assert_eq!(
        select_params("test", &pow).unwrap_err(),
        ParamsError::AlreadySelected {
            current: "main".into(),
            requested: "test".into(),
        }
    );
    assert_eq!(params().network, Network::Main);
}

#[test]
fn test_registry_holds_three_distinct_networks() {
    let registry = registry().unwrap();
    let ports: Vec<u16> = Network::ALL
        .iter()
        .map(|n| registry.get(*n).default_port)
        .collect();
    assert_eq!(ports, vec![11226, 21226, 31226]);
    assert_eq!(registry.lookup("regtest").unwrap().network, Network::Regtest);
}
