//! Buyer and seller sets never share a name.

use escra_app::{CollaboratorRegistry, PartySide};
use escra_core::{Collaborator, ContractRole, Permission};
use proptest::prelude::*;

const NAMES: [&str; 4] = ["Ana", "Ben", "Cara", "Dana"];

fn registry_with(count: usize) -> CollaboratorRegistry {
    let mut registry = CollaboratorRegistry::new();
    for name in NAMES.iter().take(count) {
        registry.set_staging_name(*name);
        registry.set_staging_email(format!("{}@example.com", name.to_lowercase()));
        registry.set_staging_permission(Permission::Sign, true);
        registry.set_staging_role(ContractRole::Standard);
        registry.add().unwrap();
    }
    registry
}

fn overlaps(a: &[String], b: &[String]) -> bool {
    a.iter().any(|x| b.iter().any(|y| x.eq_ignore_ascii_case(y)))
}

#[test]
fn test_selecting_evicts_from_other_side() {
    let mut registry = registry_with(3);
    assert!(registry.select_buyer("Ben"));
    assert!(registry.select_seller("ben"));
    assert!(registry.buyers().is_empty());
    assert_eq!(registry.sellers(), ["Ben".to_string()]);
}

#[test]
fn test_unknown_name_not_selected() {
    let mut registry = registry_with(2);
    assert!(!registry.toggle_buyer("Zed"));
    assert!(registry.buyers().is_empty());
}

#[test]
fn test_seller_default_skips_chosen_buyer() {
    let mut registry = registry_with(2);
    registry.select_buyer("Ben");
    assert_eq!(registry.effective_buyers(), vec!["Ben".to_string()]);
    assert!(registry.effective_sellers().is_empty());
}

#[test]
fn test_only_signer_added_once() {
    let mut registry = registry_with(1);
    let user = Collaborator::new(
        "Morgan",
        "morgan@example.com",
        [Permission::Sign],
        ContractRole::Standard,
    );
    assert!(registry.set_only_signer(&user, true));
    assert_eq!(registry.committed().len(), 2);
    registry.set_only_signer(&user, false);
    assert_eq!(registry.committed().len(), 1);
}

proptest! {
    #[test]
    fn prop_role_sets_disjoint(
        count in 1usize..=4,
        ops in proptest::collection::vec((any::<bool>(), 0usize..5, any::<bool>()), 0..40),
    ) {
        let mut registry = registry_with(count);
        for (buyer, index, upper) in ops {
            let name = NAMES.get(index).copied().unwrap_or("Nobody");
            let name = if upper { name.to_uppercase() } else { name.to_string() };
            let side = if buyer { PartySide::Buyer } else { PartySide::Seller };
            registry.toggle(side, &name);

            prop_assert!(!overlaps(registry.buyers(), registry.sellers()));
            prop_assert!(!overlaps(&registry.effective_buyers(), &registry.effective_sellers()));
            for chosen in registry.buyers().iter().chain(registry.sellers()) {
                prop_assert!(registry.committed().iter().any(|c| &c.name == chosen));
            }
        }
    }
}
