//! Sample data for the admin pages. Orders placed through the checkout are not stored, so the dashboard, the
//! orders table and the calendar all work from these lists.
use bobiare_common::Pesos;
use chrono::NaiveDate;

use crate::{
    db_types::{OrderId, OrderStatusType},
    shop_api::admin_objects::{status_label, AdminOrder, Delivery, DeliveryKind},
};

#[rustfmt::skip]
const ORDERS: [(&str, &str, &str, &str, u32, OrderStatusType, i64); 7] = [
    ("12345", "Juan Pérez", "juan.perez", "Arenado de Cuadro de Moto", 20, OrderStatusType::Processing, 25_000),
    ("12344", "María González", "maria.gonzalez", "Pintura Industrial", 19, OrderStatusType::Completed, 35_000),
    ("12343", "Carlos Rodríguez", "carlos.rodriguez", "Restauración de Muebles", 18, OrderStatusType::Pending, 18_000),
    ("12342", "Laura Fernández", "laura.fernandez", "Pulido de Acero", 18, OrderStatusType::Shipping, 12_000),
    ("12341", "Roberto Silva", "roberto.silva", "Powdercoating Bicicleta", 17, OrderStatusType::Completed, 22_000),
    ("12340", "Ana Martínez", "ana.martinez", "Tratamiento Anticorrosivo", 16, OrderStatusType::Cancelled, 35_000),
    ("12339", "Pedro López", "pedro.lopez", "Arenado de Llantas", 15, OrderStatusType::Completed, 15_000),
];

#[rustfmt::skip]
const DELIVERIES: [(&str, &str, u32, &str, &str, &str, DeliveryKind); 8] = [
    ("1", "Entrega #12345 - Juan Pérez", 22, "10:00", "Av. Rivadavia 1234", "Arenado de Cuadro", DeliveryKind::Scheduled),
    ("2", "Entrega #12340 - Roberto Silva", 22, "15:00", "Calle Corrientes 5678", "Powdercoating Bicicleta", DeliveryKind::Scheduled),
    ("3", "Retiro #12348 - Ana López", 22, "12:30", "Av. Santa Fe 2468", "Pintura de Moto", DeliveryKind::Pickup),
    ("4", "Entrega #12338 - Ana Martínez", 23, "11:30", "Calle Callao 9876", "Tratamiento Anticorrosivo", DeliveryKind::Scheduled),
    ("5", "Retiro #12350 - Carlos González", 23, "14:00", "Av. Córdoba 3456", "Restauración de Muebles", DeliveryKind::Pickup),
    ("6", "Entrega #12332 - Pedro López", 24, "14:00", "Calle Florida 7890", "Arenado de Llantas", DeliveryKind::Scheduled),
    ("7", "Retiro #12352 - María Sánchez", 24, "09:30", "Av. Pueyrredón 1357", "Pintura Industrial", DeliveryKind::Pickup),
    ("8", "Entrega #12330 - Javier Rodríguez", 25, "16:00", "Calle Lavalle 2468", "Pulido de Acero", DeliveryKind::Scheduled),
];

fn august_2023(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 8, day).unwrap_or_default()
}

pub fn sample_orders() -> Vec<AdminOrder> {
    ORDERS
        .iter()
        .map(|(id, customer, mailbox, product, day, status, total)| AdminOrder {
            id: OrderId(id.to_string()),
            customer: customer.to_string(),
            email: format!("{mailbox}@example.com"),
            product: product.to_string(),
            date: august_2023(*day),
            status: *status,
            status_label: status_label(*status).to_string(),
            total: Pesos::from(*total),
        })
        .collect()
}

pub fn sample_deliveries() -> Vec<Delivery> {
    DELIVERIES
        .iter()
        .map(|(id, title, day, time, street, product, kind)| Delivery {
            id: id.to_string(),
            title: title.to_string(),
            date: august_2023(*day),
            time: time.to_string(),
            address: format!("{street}, CABA"),
            product: product.to_string(),
            kind: *kind,
        })
        .collect()
}
