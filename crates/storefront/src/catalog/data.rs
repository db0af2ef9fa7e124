//! The built-in SUNBAG range.

use sunbag_core::{Category, Price, Product, ProductId, TechnicalSpecs};

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|&v| v.to_owned()).collect()
}

fn text(value: &str) -> Option<String> {
    Some(value.to_owned())
}

#[allow(clippy::too_many_arguments)]
fn product(
    id: &str,
    name: &str,
    description: &str,
    price: f64,
    category: Category,
    images: &[&str],
    specs: &[&str],
    badges: &[&str],
) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_owned(),
        description: description.to_owned(),
        price: Price::new(price),
        category,
        images: strings(images),
        specs: strings(specs),
        badges: strings(badges),
        in_stock: true,
        long_description: None,
        features: Vec::new(),
        technical_specs: None,
    }
}

/// All products, in shop display order.
#[allow(clippy::too_many_lines)]
pub(super) fn products() -> Vec<Product> {
    vec![
        Product {
            long_description: text(concat!(
                "<p><strong>Le kit ultime pour l'aventure.</strong></p>",
                "<p>Le Kit EXPEDITION est conçu pour ceux qui partent loin et longtemps. ",
                "Il combine notre panneau solaire <strong>\"Performance\"</strong> haute efficacité ",
                "avec la batterie Xtorm Rugged 20K, une référence mondiale en matière de résistance.</p>",
                "<p>Que vous soyez sur le GR20, en Islande ou en haute montagne, ce kit vous assure ",
                "une réserve d'énergie constante et fiable, quelles que soient les conditions météorologiques.</p>",
            )),
            features: strings(&[
                "Autonomie illimitée grâce au solaire",
                "Résistance totale à l'eau et aux chocs (IP65)",
                "Lampe torche intégrée 100 lumens",
                "Fixation universelle sur tout sac à dos",
            ]),
            technical_specs: Some(TechnicalSpecs {
                capacity: text("20.000 mAh (74Wh)"),
                input: text("USB-C PD 35W"),
                output: text("2x USB-C, 2x USB-A (Max 35W)"),
                weight: text("Panneau (200g) + Batterie (540g)"),
                waterproof: text("IP65 (Batterie et Panneau)"),
                warranty: text("3 ans"),
                box_contents: text(
                    "Panneau Flex 10W, Batterie Xtorm Rugged 20K, Câble USB-C, Mousquetons",
                ),
                ..TechnicalSpecs::default()
            }),
            ..product(
                "kit-expedition",
                "Kit Rando \"EXPEDITION\"",
                "L'autonomie totale pour les treks engagés. Résiste à l'immersion et aux chocs.",
                71.98,
                Category::Kit,
                &[
                    "/images/kit1.1.jpg",
                    "/images/kit1.2.jpg",
                    "/images/kit1.3.jpg",
                ],
                &["20.000 mAh", "Étanche IP65", "Charge Rapide 35W"],
                &["Best-seller"],
            )
        },
        Product {
            long_description: text(concat!(
                "<p><strong>Léger, Local, Durable.</strong></p>",
                "<p>Le Kit ESSENTIEL associe la performance de notre panneau solaire ",
                "<strong>\"Eco\"</strong> léger à l'éthique de la batterie La Française. ",
                "C'est le choix idéal pour le randonneur soucieux de son poids et de son impact écologique.</p>",
                "<p>Avec seulement 210g pour la batterie, vous ne sentirez même pas que vous ",
                "transportez une centrale électrique.</p>",
            )),
            features: strings(&[
                "Poids ultra-léger",
                "Batterie fabriquée en France",
                "Plastiques 100% recyclés",
                "Format poche idéal",
            ]),
            technical_specs: Some(TechnicalSpecs {
                capacity: text("10.000 mAh"),
                input: text("USB-C"),
                output: text("USB-A & USB-C (22.5W)"),
                weight: text("Panneau (200g) + Batterie (210g)"),
                origin: text("Assemblage France (Jura)"),
                warranty: text("3 ans"),
                box_contents: text(
                    "Panneau Flex 10W, Batterie La Française 10K, Câble, Mousquetons",
                ),
                ..TechnicalSpecs::default()
            }),
            ..product(
                "kit-essentiel",
                "Kit Rando \"ESSENTIEL\"",
                "L'alternative légère et éthique. Parfait pour la journée ou les études. Coque 100% recyclée.",
                33.36,
                Category::Kit,
                &["/images/kit.jpg"],
                &["10.000 mAh", "Poids Plume (210g)", "Assemblé Jura"],
                &[],
            )
        },
        Product {
            long_description: text(concat!(
                "<h3>IP65 Water Resistant</h3>",
                "<p>This power bank has been designed and tested to be IP65 water resistant, ",
                "meaning you don’t have to worry about unpredictable weather or accidentally ",
                "dropping the power bank in shallow water. Perfect for any situation when exploring the outdoors!</p>",
                "<h3>Recharge your phone 4x</h3>",
                "<p>Don’t let the compact design fool you, this power bank packs a powerful ",
                "20.000mAh battery that’s large enough to recharge your phone at least 4 times. ",
                "You can also easily charge other small electronic devices such as a digital camera, GPS or drone.</p>",
                "<h3>Fast charge any device</h3>",
                "<p>The power bank features a USB-C Power Delivery port capable of 35W in-/output, ",
                "as well as two regular USB ports with Quick Charge 3.0.</p>",
            )),
            features: strings(&[
                "20.000mAh internal battery",
                "Charges 4 devices at the same time",
                "Integrated Flashlight",
                "Water-resistant IP65",
                "Shockproof design",
            ]),
            technical_specs: Some(TechnicalSpecs {
                brand: text("Xtorm"),
                capacity: text("20.000 mAh (74Wh)"),
                input: text("USB-C PD 35W"),
                output: text("1x USB-C PD (35W), 1x USB-C (15W), 2x USB-A QC 3.0 (18W)"),
                weight: text("540g"),
                dimensions: text("23.60 x 11.90 x 3.00 cm"),
                waterproof: text("IP65"),
                warranty: text("2 ans"),
                material: text("ABS, PC"),
                ..TechnicalSpecs::default()
            }),
            ..product(
                "batt-rugged",
                "Batterie \"Xtorm Rugged 20K\"",
                "La batterie des survivants. Chute, boue, pluie : elle résiste à tout. Lampe torche intégrée.",
                54.89,
                Category::Battery,
                &["/images/XR202-00.png"],
                &["20.000 mAh", "IP65", "Anti-Choc"],
                &["Outdoor Expert"],
            )
        },
        Product {
            long_description: text(concat!(
                "<p><strong>Batterie \"La Française 10K\" (Modèle ALEX) - L'alternative éthique et locale.</strong></p>",
                "<p>Cette batterie incarne notre engagement pour un circuit court. Assemblée dans le Jura, ",
                "elle limite drastiquement l'impact carbone lié au transport tout en soutenant l'industrie française.</p>",
                "<p>Malgré sa fabrication locale, elle ne fait aucun compromis sur la performance avec une ",
                "charge rapide 22.5W et un format ultra-compact qui se glisse dans n'importe quelle poche de sac à dos.</p>",
            )),
            features: strings(&[
                "Origine Certifiée : Assemblée en France (Jura)",
                "Garantie Étendue : 3 ans",
                "Éco-conception : Coque en ABS Recyclé",
                "Poids Plume : Seulement 210g",
            ]),
            technical_specs: Some(TechnicalSpecs {
                brand: text("Meaning Crafters"),
                capacity: text("10.000 mAh"),
                input: text("USB-C"),
                output: text("USB-A & USB-C (22.5W Charge Rapide)"),
                weight: text("210g"),
                dimensions: text("140 x 67 x 15.7 mm"),
                origin: text("France"),
                warranty: text("3 ans"),
                material: text("Recycled ABS"),
                ..TechnicalSpecs::default()
            }),
            ..product(
                "batt-fr",
                "La Française 10K",
                "Élégance et performance. Une batterie ultra-compacte assemblée en France.",
                17.29,
                Category::Battery,
                &["/images/Powerbank-ALEX-6.jpg"],
                &["10.000 mAh", "Garantie 3 ans", "Format Poche"],
                &["Made in France"],
            )
        },
        Product {
            long_description: text(concat!(
                "<p>Le panneau <strong>Performance</strong> est celui intégré au Kit EXPEDITION. ",
                "Fabriqué par <strong>SOECOPO</strong>, il s'agit d'un module pliable de 40W en silicium ",
                "monocristallin. Résultat : une charge complète de votre batterie en environ ",
                "<strong>2h30</strong>, même en montagne.</p>",
            )),
            technical_specs: Some(TechnicalSpecs {
                capacity: text("10 Watts"),
                output: text("USB-A 5V/2A"),
                weight: text("200g"),
                dimensions: text("Format A4 environ"),
                waterproof: text("IP65 (Face avant)"),
                warranty: text("3 ans"),
                ..TechnicalSpecs::default()
            }),
            ..product(
                "solar-performance",
                "Panneau Solaire \"PERFORMANCE\"",
                "Cellules haute efficacité pour une charge rapide. Fabricant : SOECOPO (40W pliable).",
                17.10,
                Category::Accessory,
                &["/images/panneau.jpg"],
                &[
                    "40W pliable",
                    "Silicium monocristallin",
                    "Charge 2h30",
                    "Fabricant SOECOPO",
                ],
                &["Premium"],
            )
        },
        Product {
            long_description: text(concat!(
                "<p>Le panneau <strong>Eco</strong> équipe le Kit ESSENTIEL. Fournisseur <strong>Oillu</strong>, ",
                "format 15W pliable en silicone monocristallin + PET + tissu. Comptez environ ",
                "<strong>4 heures</strong> pour recharger complètement la batterie standard, avec un poids minimal.</p>",
            )),
            technical_specs: Some(TechnicalSpecs {
                capacity: text("8 Watts"),
                output: text("USB-A 5V/1.5A"),
                weight: text("150g"),
                dimensions: text("Format compact"),
                waterproof: text("IP54"),
                warranty: text("2 ans"),
                ..TechnicalSpecs::default()
            }),
            ..product(
                "solar-eco",
                "Panneau Solaire \"ECO\"",
                "L'entrée de gamme fiable et légère. Fabricant : Oillu (15W pliable).",
                10.87,
                Category::Accessory,
                &["/images/panneau.jpg"],
                &[
                    "15W pliable",
                    "Silicone monocristallin + PET + tissu",
                    "Charge 4h",
                    "Fabricant Oillu",
                ],
                &["Eco"],
            )
        },
        Product {
            long_description: text(concat!(
                "<p>Le SUNBAG ONE est l'aboutissement de notre vision. Conçu spécifiquement pour intégrer ",
                "le panneau solaire, il dispose d'un compartiment dédié 'Power Station' pour protéger votre ",
                "batterie tout en la gardant connectée. Son dos ventilé et ses bretelles ergonomiques en font ",
                "un véritable sac de trek.</p>",
            )),
            technical_specs: Some(TechnicalSpecs {
                capacity: text("40 Litres"),
                material: text("Nylon Ripstop & Matériaux revalorisés"),
                weight: text("1.2 kg (à vide)"),
                features: text("Housse de pluie, Passages de câbles internes, Dos filet tendu"),
                warranty: text("2 ans"),
                ..TechnicalSpecs::default()
            }),
            ..product(
                "sunbag-one",
                "Sac à Dos \"SUNBAG ONE\"",
                "Un sac technique de 40L avec compartiment solaire natif. Dos ventilé et passages de câbles.",
                249.00,
                Category::Accessory,
                &[
                    "/images/sac1.jpg",
                    "/images/galery2.png",
                    "/images/galery3.jpg",
                    "/images/galery4.jpg",
                ],
                &["40 Litres", "Tissu Ripstop", "Ergonomie Trekking"],
                &["Nouveau"],
            )
        },
    ]
}
