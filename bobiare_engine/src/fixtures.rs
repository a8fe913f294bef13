//! The launch catalog: six services and ten paint colors.
//!
//! [`crate::MemoryBackend`] starts from this data, and the SQLite migrations seed the same rows.
use bobiare_common::Pesos;

use crate::db_types::{ColorOption, Product};

const PRODUCTS: [(&str, &str, &str, i64, &str, &str); 6] = [
    (
        "1",
        "Arenado y Pintura de Cuadro de Moto",
        "Motos",
        25_000,
        "Servicio completo de arenado y pintura para cuadros de motocicletas. Incluye remoción de pintura vieja, \
         eliminación de óxido, preparación de superficie, primer y pintura de alta calidad con acabado duradero.",
        "https://images.pexels.com/photos/2519374/pexels-photo-2519374.jpeg",
    ),
    (
        "2",
        "Tratamiento Anticorrosivo Industrial",
        "Industrial",
        35_000,
        "Tratamiento especializado para piezas y estructuras industriales. Incluye limpieza química, aplicación de \
         productos anticorrosivos y sellado final para máxima protección en ambientes agresivos.",
        "https://images.pexels.com/photos/3888151/pexels-photo-3888151.jpeg",
    ),
    (
        "3",
        "Restauración de Muebles Metálicos",
        "Hogar",
        18_000,
        "Servicio completo de restauración para muebles metálicos del hogar. Incluye limpieza, tratamiento de óxido, \
         reparaciones menores y acabado con pintura según especificaciones del cliente.",
        "https://images.pexels.com/photos/4846097/pexels-photo-4846097.jpeg",
    ),
    (
        "4",
        "Pulido de Superficies de Acero Inoxidable",
        "Industrial",
        12_000,
        "Servicio de pulido profesional para superficies de acero inoxidable. Ideal para equipamiento de cocina \
         industrial, barandas, y elementos decorativos que requieren un acabado brillante y duradero.",
        "https://images.pexels.com/photos/162553/keys-workshop-mechanic-tools-162553.jpeg",
    ),
    (
        "5",
        "Arenado de Piezas de Automóvil",
        "Automóviles",
        15_000,
        "Servicio de arenado para componentes de automóviles. Perfecto para llantas, carcasas, piezas del motor y \
         otros componentes que requieren una limpieza profunda antes de ser restaurados.",
        "https://images.pexels.com/photos/3807329/pexels-photo-3807329.jpeg",
    ),
    (
        "6",
        "Acabado Powercoating para Bicicletas",
        "Bicicletas",
        22_000,
        "Tratamiento completo de powdercoating para cuadros y componentes de bicicletas. Incluye preparación, \
         aplicación electrostática y horneado para un acabado duradero y resistente a los elementos.",
        "https://images.pexels.com/photos/100582/pexels-photo-100582.jpeg",
    ),
];

const COLORS: [(&str, &str, &str, i64); 10] = [
    ("c1", "Negro Mate", "#1a1a1a", 0),
    ("c2", "Negro Brillante", "#0f0f0f", 500),
    ("c3", "Blanco", "#ffffff", 0),
    ("c4", "Rojo Ferrari", "#ff2800", 1500),
    ("c5", "Azul Metálico", "#0047ab", 1200),
    ("c6", "Verde Militar", "#4b5320", 800),
    ("c7", "Plata", "#c0c0c0", 1000),
    ("c8", "Dorado", "#ffd700", 2000),
    ("c9", "Naranja", "#ff7f00", 800),
    ("c10", "Personalizado", "#cccccc", 2500),
];

pub fn seed_products() -> Vec<Product> {
    PRODUCTS
        .iter()
        .map(|(id, name, category, price, description, image)| Product {
            id: (*id).into(),
            name: name.to_string(),
            category: category.to_string(),
            description: description.to_string(),
            image: image.to_string(),
            color_id: None,
            time_estimate: None,
            price: Pesos::from(*price),
        })
        .collect()
}

pub fn seed_colors() -> Vec<ColorOption> {
    COLORS
        .iter()
        .map(|(id, name, code, price)| ColorOption {
            id: (*id).into(),
            name: name.to_string(),
            color_code: code.to_string(),
            price: Pesos::from(*price),
        })
        .collect()
}
