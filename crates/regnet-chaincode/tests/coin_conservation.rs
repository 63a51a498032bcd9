//! # Randomized Market Simulation
//!
//! A seeded sequence of purchases and relistings among a fixed population.
//! Recharges only happen during setup, so the total coin supply must stay
//! constant across every trade, successful or not.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use regnet_chaincode::prelude::*;

const USER_COUNT: usize = 6;
const PROPERTY_COUNT: usize = 8;
const STEPS: usize = 300;

struct Member {
    name: String,
    aadhar: String,
    key: String,
}

async fn total_coins(service: &RegistryService<InMemoryLedger>, members: &[Member]) -> u64 {
    let mut total = 0;
    for m in members {
        total += service
            .view_user("auditor", &m.name, &m.aadhar)
            .await
            .unwrap()
            .coin_balance;
    }
    total
}

async fn setup(rng: &mut StdRng) -> (RegistryService<InMemoryLedger>, Vec<Member>) {
    let service = create_test_service();
    let mut members = Vec::new();

    for i in 0..USER_COUNT {
        let name = format!("user{i}");
        let aadhar = format!("{:04}", 1000 + i);
        service
            .request_new_user(&name, &name, "mail", "phone", &aadhar, "t0")
            .await
            .unwrap();
        service.approve_new_user("registrar", &name, &aadhar).await.unwrap();
        let tier = RechargeTier::ALL[rng.gen_range(0..RechargeTier::ALL.len())];
        service
            .recharge_account(&name, &name, &aadhar, tier.transaction_id())
            .await
            .unwrap();
        let key = service.owner_key(&name, &aadhar).unwrap();
        members.push(Member { name, aadhar, key });
    }

    for p in 0..PROPERTY_COUNT {
        let owner = &members[rng.gen_range(0..USER_COUNT)];
        let id = format!("P{p}");
        let price = rng.gen_range(1..=600);
        service
            .property_registration_request(&owner.key, &id, &owner.key, price, PropertyStatus::ForSale)
            .await
            .unwrap();
        service.approve_property_registration("registrar", &id).await.unwrap();
    }

    (service, members)
}

#[tokio::test]
async fn test_random_trading_conserves_coins() {
    let mut rng = StdRng::seed_from_u64(0x5EED_2024);
    let (service, members) = setup(&mut rng).await;
    let supply = total_coins(&service, &members).await;

    let mut sales = 0;
    for _ in 0..STEPS {
        let id = format!("P{}", rng.gen_range(0..PROPERTY_COUNT));

        if rng.gen_bool(0.3) {
            let property = service.view_property("auditor", &id).await.unwrap();
            service
                .update_property_status(&property.owner, &id, PropertyStatus::ForSale)
                .await
                .unwrap();
            continue;
        }

        let buyer = &members[rng.gen_range(0..USER_COUNT)];
        let before = service.view_property("auditor", &id).await.unwrap();
        match service
            .purchase_property(&buyer.key, &id, &buyer.name, &buyer.aadhar)
            .await
        {
            Ok(receipt) => {
                sales += 1;
                assert_eq!(receipt.property.owner, buyer.key);
                assert_eq!(receipt.property.status, PropertyStatus::Registered);
                assert_eq!(receipt.property.price, before.price);
            }
            Err(err) => {
                assert!(
                    matches!(
                        err.kind(),
                        ErrorKind::NotForSale | ErrorKind::InvalidPurchase | ErrorKind::InsufficientFunds
                    ),
                    "unexpected failure: {err}"
                );
                let after = service.view_property("auditor", &id).await.unwrap();
                assert_eq!(after, before);
            }
        }

        assert_eq!(total_coins(&service, &members).await, supply);
    }

    assert!(sales > 0, "simulation never completed a sale");

    // Every property is still owned by a member.
    for p in 0..PROPERTY_COUNT {
        let property = service.view_property("auditor", &format!("P{p}")).await.unwrap();
        assert!(members.iter().any(|m| m.key == property.owner));
    }
}
