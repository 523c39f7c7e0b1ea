//! Integration tests over the in-memory backend.
//!
//! Exercises the cart, catalog, and order contracts together, including the
//! full placement path: add → snapshot → create → clear.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use shoplite_cart::{total, CartStore};
    use shoplite_catalog::{Catalog, Product};
    use shoplite_core::{CartLineId, ProductId, StoreError, UserId};
    use shoplite_orders::{OrderPlacement, OrderStore, PlaceOrderError};

    use crate::memory::{InMemoryCartStore, InMemoryCatalog, InMemoryOrderStore};
    use crate::seed::seed_demo_catalog;

    type Placement =
        OrderPlacement<Arc<InMemoryCartStore>, Arc<InMemoryCatalog>, Arc<InMemoryOrderStore>>;

    fn setup() -> (
        Arc<InMemoryCartStore>,
        Arc<InMemoryCatalog>,
        Arc<InMemoryOrderStore>,
        Placement,
    ) {
        let cart = Arc::new(InMemoryCartStore::new());
        let catalog = Arc::new(InMemoryCatalog::new());
        let orders = Arc::new(InMemoryOrderStore::new());
        let placement = OrderPlacement::new(cart.clone(), catalog.clone(), orders.clone());
        (cart, catalog, orders, placement)
    }

    async fn seed_product(catalog: &InMemoryCatalog, name: &str, price: u64) -> ProductId {
        let product = Product::new(ProductId::new(), name, "", price).unwrap();
        let id = product.id();
        catalog.insert(product).await.unwrap();
        id
    }

    #[tokio::test]
    async fn add_item_creates_then_accumulates() {
        let (cart, _, _, _) = setup();
        let user_id = UserId::new();
        let product_id = ProductId::new();

        let first = cart.add_item(user_id, product_id).await.unwrap();
        assert_eq!(first.quantity, 1);

        let second = cart.add_item(user_id, product_id).await.unwrap();
        assert_eq!(second.quantity, 2);
        assert_eq!(second.id, first.id);

        let lines = cart.list_items(user_id).await.unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].quantity, 2);
    }

    #[tokio::test]
    async fn add_item_keeps_separate_lines_per_product() {
        let (cart, _, _, _) = setup();
        let user_id = UserId::new();
        let mug = ProductId::new();
        let tote = ProductId::new();

        cart.add_item(user_id, mug).await.unwrap();
        cart.add_item(user_id, tote).await.unwrap();
        cart.add_item(user_id, mug).await.unwrap();

        let lines = cart.list_items(user_id).await.unwrap();
        assert_eq!(lines.len(), 2);
        let mug_line = lines.iter().find(|l| l.product_id == mug).unwrap();
        let tote_line = lines.iter().find(|l| l.product_id == tote).unwrap();
        assert_eq!(mug_line.quantity, 2);
        assert_eq!(tote_line.quantity, 1);
    }

    #[tokio::test]
    async fn set_quantity_overwrites_in_place() {
        let (cart, _, _, _) = setup();
        let user_id = UserId::new();
        let product_id = ProductId::new();

        let line = cart.add_item(user_id, product_id).await.unwrap();
        cart.set_quantity(user_id, line.id, 5).await.unwrap();

        let lines = cart.list_items(user_id).await.unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].id, line.id);
        assert_eq!(lines[0].quantity, 5);
    }

    #[tokio::test]
    async fn set_quantity_zero_removes_the_line() {
        let (cart, _, _, _) = setup();
        let user_id = UserId::new();
        let line = cart.add_item(user_id, ProductId::new()).await.unwrap();

        cart.set_quantity(user_id, line.id, 0).await.unwrap();
        assert!(cart.list_items(user_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn set_quantity_rejects_another_users_line() {
        let (cart, _, _, _) = setup();
        let owner = UserId::new();
        let intruder = UserId::new();
        let line = cart.add_item(owner, ProductId::new()).await.unwrap();

        let err = cart.set_quantity(intruder, line.id, 7).await.unwrap_err();
        assert!(matches!(err, StoreError::Unauthorized));

        // The owner's line is untouched.
        let lines = cart.list_items(owner).await.unwrap();
        assert_eq!(lines[0].quantity, 1);
    }

    #[tokio::test]
    async fn set_quantity_unknown_line_is_not_found() {
        let (cart, _, _, _) = setup();
        let err = cart
            .set_quantity(UserId::new(), CartLineId::new(), 3)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound));
    }

    #[tokio::test]
    async fn remove_item_missing_line_is_a_noop() {
        let (cart, _, _, _) = setup();
        cart.remove_item(UserId::new(), CartLineId::new()).await.unwrap();
    }

    #[tokio::test]
    async fn remove_item_rejects_another_users_line() {
        let (cart, _, _, _) = setup();
        let owner = UserId::new();
        let intruder = UserId::new();
        let line = cart.add_item(owner, ProductId::new()).await.unwrap();

        let err = cart.remove_item(intruder, line.id).await.unwrap_err();
        assert!(matches!(err, StoreError::Unauthorized));
        assert_eq!(cart.list_items(owner).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn clear_removes_only_that_users_lines() {
        let (cart, _, _, _) = setup();
        let alice = UserId::new();
        let bob = UserId::new();
        cart.add_item(alice, ProductId::new()).await.unwrap();
        cart.add_item(bob, ProductId::new()).await.unwrap();

        cart.clear(alice).await.unwrap();

        assert!(cart.list_items(alice).await.unwrap().is_empty());
        assert_eq!(cart.list_items(bob).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn total_sums_price_times_quantity() {
        let (cart, catalog, _, _) = setup();
        let user_id = UserId::new();
        let mug = seed_product(&catalog, "Colorful Mug", 1200).await;
        let stickers = seed_product(&catalog, "Sticker Set", 500).await;

        cart.add_item(user_id, mug).await.unwrap();
        cart.add_item(user_id, mug).await.unwrap();
        cart.add_item(user_id, stickers).await.unwrap();

        let sum = total(&*cart, &*catalog, user_id).await.unwrap();
        assert_eq!(sum, 2900);
    }

    #[tokio::test]
    async fn total_treats_missing_product_as_zero() {
        let (cart, catalog, _, _) = setup();
        let user_id = UserId::new();
        let mug = seed_product(&catalog, "Colorful Mug", 1200).await;
        let vanished = ProductId::new();

        cart.add_item(user_id, mug).await.unwrap();
        cart.add_item(user_id, vanished).await.unwrap();

        let sum = total(&*cart, &*catalog, user_id).await.unwrap();
        assert_eq!(sum, 1200);
    }

    #[tokio::test]
    async fn place_order_on_empty_cart_is_reported() {
        let (_, _, orders, placement) = setup();
        let user_id = UserId::new();

        let err = placement.place_order(user_id).await.unwrap_err();
        assert!(matches!(err, PlaceOrderError::EmptyCart));
        assert!(orders.list(user_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn place_order_snapshots_prices_at_call_time() {
        let (cart, catalog, orders, placement) = setup();
        let user_id = UserId::new();
        let mug = seed_product(&catalog, "Colorful Mug", 1200).await;

        cart.add_item(user_id, mug).await.unwrap();
        let order = placement.place_order(user_id).await.unwrap();

        // A later price change must not reach the placed order.
        catalog
            .insert(Product::new(mug, "Colorful Mug", "", 9999).unwrap())
            .await
            .unwrap();

        let stored = orders.get(user_id, order.id()).await.unwrap().unwrap();
        assert_eq!(stored.lines().len(), 1);
        assert_eq!(stored.lines()[0].price_at_order, 1200);
        assert_eq!(orders.list(user_id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn place_order_clears_the_cart() {
        let (cart, catalog, _, placement) = setup();
        let user_id = UserId::new();
        let mug = seed_product(&catalog, "Colorful Mug", 1200).await;

        cart.add_item(user_id, mug).await.unwrap();
        placement.place_order(user_id).await.unwrap();

        assert!(cart.list_items(user_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn end_to_end_repeat_add_then_place() {
        let (cart, catalog, orders, placement) = setup();
        let user_id = UserId::new();
        let mug = seed_product(&catalog, "Colorful Mug", 1200).await;

        cart.add_item(user_id, mug).await.unwrap();
        cart.add_item(user_id, mug).await.unwrap();

        let order = placement.place_order(user_id).await.unwrap();
        assert_eq!(order.lines().len(), 1);
        assert_eq!(order.lines()[0].product_id, mug);
        assert_eq!(order.lines()[0].quantity, 2);
        assert_eq!(order.lines()[0].price_at_order, 1200);
        assert_eq!(order.total(), 2400);

        assert!(cart.list_items(user_id).await.unwrap().is_empty());
        assert_eq!(orders.list(user_id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn orders_list_newest_first() {
        let (cart, catalog, orders, placement) = setup();
        let user_id = UserId::new();
        let mug = seed_product(&catalog, "Colorful Mug", 1200).await;
        let tote = seed_product(&catalog, "Canvas Tote", 1800).await;

        cart.add_item(user_id, mug).await.unwrap();
        let first = placement.place_order(user_id).await.unwrap();

        cart.add_item(user_id, tote).await.unwrap();
        let second = placement.place_order(user_id).await.unwrap();

        let listed = orders.list(user_id).await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id(), second.id());
        assert_eq!(listed[1].id(), first.id());
    }

    #[tokio::test]
    async fn orders_are_scoped_to_their_owner() {
        let (cart, catalog, orders, placement) = setup();
        let alice = UserId::new();
        let bob = UserId::new();
        let mug = seed_product(&catalog, "Colorful Mug", 1200).await;

        cart.add_item(alice, mug).await.unwrap();
        let order = placement.place_order(alice).await.unwrap();

        assert!(orders.get(bob, order.id()).await.unwrap().is_none());
        let err = orders.delete(bob, order.id()).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound));

        // Alice still owns it, and can delete the whole order.
        assert!(orders.get(alice, order.id()).await.unwrap().is_some());
        orders.delete(alice, order.id()).await.unwrap();
        assert!(orders.get(alice, order.id()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn concurrent_double_submit_creates_one_order() {
        let (cart, catalog, orders, placement) = setup();
        let user_id = UserId::new();
        let mug = seed_product(&catalog, "Colorful Mug", 1200).await;
        cart.add_item(user_id, mug).await.unwrap();

        let (a, b) = tokio::join!(placement.place_order(user_id), placement.place_order(user_id));

        // One submission wins; the other observes the cleared cart.
        let outcomes = [a, b];
        assert_eq!(outcomes.iter().filter(|r| r.is_ok()).count(), 1);
        assert!(outcomes
            .iter()
            .any(|r| matches!(r, Err(PlaceOrderError::EmptyCart))));
        assert_eq!(orders.list(user_id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn seed_demo_catalog_populates_the_shop() {
        let catalog = InMemoryCatalog::new();
        let products = seed_demo_catalog(&catalog).await.unwrap();
        assert_eq!(products.len(), 4);

        let mugs = catalog.list(Some("mug")).await.unwrap();
        assert_eq!(mugs.len(), 1);
        assert_eq!(mugs[0].price(), 1200);

        let all = catalog.list(None).await.unwrap();
        assert_eq!(all.len(), 4);
    }

    mod properties {
        use proptest::prelude::*;

        use super::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 64,
                ..ProptestConfig::default()
            })]

            /// Repeating `add_item` n times yields one line with quantity n.
            #[test]
            fn add_item_accumulates_for_any_count(adds in 1u32..50) {
                let rt = tokio::runtime::Builder::new_current_thread()
                    .build()
                    .unwrap();
                rt.block_on(async {
                    let cart = InMemoryCartStore::new();
                    let user_id = UserId::new();
                    let product_id = ProductId::new();

                    for _ in 0..adds {
                        cart.add_item(user_id, product_id).await.unwrap();
                    }

                    let lines = cart.list_items(user_id).await.unwrap();
                    prop_assert_eq!(lines.len(), 1);
                    prop_assert_eq!(lines[0].quantity, adds);
                    Ok(())
                })?;
            }
        }
    }
}
