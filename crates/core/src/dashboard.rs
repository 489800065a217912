//! Admin dashboard figures.

use chrono::NaiveDate;
use serde::Serialize;

use crate::order::Order;
use crate::records::Contact;
use crate::reservation::Reservation;
use crate::types::{Money, ReservationStatus};

/// How many recent orders and reservations the dashboard lists.
pub const RECENT_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    /// Sum of every order total, whatever its status.
    pub total_revenue: Money,
    /// Orders created on `today` (UTC calendar day).
    pub orders_today: usize,
    pub pending_reservations: usize,
    pub unread_messages: usize,
    pub recent_orders: Vec<Order>,
    pub recent_reservations: Vec<Reservation>,
}

impl DashboardStats {
    #[must_use]
    pub fn compute(
        orders: &[Order],
        reservations: &[Reservation],
        contacts: &[Contact],
        today: NaiveDate,
    ) -> Self {
        let mut recent_orders = orders.to_vec();
        recent_orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        recent_orders.truncate(RECENT_LIMIT);

        let mut recent_reservations = reservations.to_vec();
        recent_reservations.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        recent_reservations.truncate(RECENT_LIMIT);

        Self {
            total_revenue: orders.iter().map(|o| o.total).sum(),
            orders_today: orders
                .iter()
                .filter(|o| o.created_at.date_naive() == today)
                .count(),
            pending_reservations: reservations
                .iter()
                .filter(|r| r.status == ReservationStatus::Pending)
                .count(),
            unread_messages: contacts.iter().filter(|c| !c.is_read).count(),
            recent_orders,
            recent_reservations,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{Duration, NaiveTime, TimeZone, Utc};

    use super::*;
    use crate::order::PersistedOrderType;
    use crate::types::{ContactId, Email, OrderId, OrderStatus, ReservationId};

    fn order(id: i32, total_cents: u32, days_ago: i64) -> Order {
        let noon = Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap();
        Order {
            id: OrderId::new(id),
            customer_name: "Ana".to_owned(),
            customer_phone: String::new(),
            customer_address: None,
            order_type: PersistedOrderType::DineIn,
            items: vec![],
            subtotal: Money::ZERO,
            tax: Money::ZERO,
            total: Money::from_cents(total_cents),
            status: OrderStatus::New,
            created_at: noon - Duration::days(days_ago) + Duration::minutes(i64::from(id)),
        }
    }

    fn reservation(id: i32, status: ReservationStatus) -> Reservation {
        Reservation {
            id: ReservationId::new(id),
            name: "Rita".to_owned(),
            email: Email::parse("rita@example.pt").unwrap(),
            phone: "91".to_owned(),
            date: NaiveDate::from_ymd_opt(2026, 10, 20).unwrap(),
            time: NaiveTime::from_hms_opt(20, 0, 0).unwrap(),
            guests: 2,
            occasion: "Dinner".to_owned(),
            status,
            created_at: Utc.with_ymd_and_hms(2026, 10, 1, 9, 0, 0).unwrap()
                + Duration::hours(i64::from(id)),
        }
    }

    fn contact(id: i32, is_read: bool) -> Contact {
        Contact {
            id: ContactId::new(id),
            name: "Rui".to_owned(),
            email: Email::parse("rui@example.pt").unwrap(),
            phone: None,
            subject: "General Inquiry".to_owned(),
            message: "Olá".to_owned(),
            is_read,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_counts_and_revenue() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let orders = [order(1, 4840, 0), order(2, 1000, 1), order(3, 160, 0)];
        let reservations = [
            reservation(1, ReservationStatus::Pending),
            reservation(2, ReservationStatus::Confirmed),
            reservation(3, ReservationStatus::Pending),
        ];
        let contacts = [contact(1, false), contact(2, true)];

        let stats = DashboardStats::compute(&orders, &reservations, &contacts, today);
        assert_eq!(stats.total_revenue, Money::from_cents(6000));
        assert_eq!(stats.orders_today, 2);
        assert_eq!(stats.pending_reservations, 2);
        assert_eq!(stats.unread_messages, 1);
    }

    #[test]
    fn test_recent_lists_are_newest_first_and_capped() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let orders: Vec<Order> = (1..=8).map(|id| order(id, 100, 0)).collect();
        let reservations: Vec<Reservation> = (1..=3)
            .map(|id| reservation(id, ReservationStatus::Pending))
            .collect();

        let stats = DashboardStats::compute(&orders, &reservations, &[], today);
        let ids: Vec<i32> = stats.recent_orders.iter().map(|o| o.id.as_i32()).collect();
        assert_eq!(ids, vec![8, 7, 6, 5, 4]);
        assert_eq!(stats.recent_reservations.len(), 3);
        assert_eq!(
            stats.recent_reservations.first().unwrap().id,
            ReservationId::new(3)
        );
    }
}
