//! Canned answers for the chat widget.
//!
//! The message is lowercased and trimmed, then matched against [`RULES`] in
//! order. The first rule whose trigger fires wins; nothing matching gives
//! [`DEFAULT_ANSWER`].

/// How a rule recognizes a message.
#[derive(Debug, Clone, Copy)]
enum Trigger {
    /// Message starts with one of these.
    StartsWith(&'static [&'static str]),
    /// Message contains one of these anywhere.
    Contains(&'static [&'static str]),
}

impl Trigger {
    fn fires(self, message: &str) -> bool {
        match self {
            Self::StartsWith(words) => words.iter().any(|w| message.starts_with(w)),
            Self::Contains(words) => words.iter().any(|w| message.contains(w)),
        }
    }
}

#[derive(Debug)]
struct Rule {
    trigger: Trigger,
    answer: &'static str,
}

const GREETING: &str = "Bonjour ! 😊 Je suis là pour vous aider à trouver le kit solaire parfait.\n\nJe peux vous renseigner sur :\n• Nos kits solaires et batteries\n• Les prix et caractéristiques\n• La livraison et les garanties\n• Quel produit choisir selon votre usage\n\nQue souhaitez-vous savoir ?";

const PRICES: &str = "💰 **Nos tarifs :**

**Kits :**
• Kit ESSENTIEL : 53,78€
• Kit EXPEDITION : 86,35€

**Batteries :**
• La Française 10K : 17,29€
• Xtorm Rugged 20K : 54,89€

**Accessoires :**
• Panneau FLEX : 31,46€
• Sac SUNBAG ONE : 249€

Livraison offerte dès 150€ ! 🎁";

const DELIVERY: &str = "📦 **Livraison :**

• Expédition sous 24h depuis la Belgique
• Livraison offerte dès 150€ d'achat
• Suivi de commande disponible
• 2-3 jours pour France/Belgique/Luxembourg

Stock garanti, envoi rapide ! ⚡";

const WARRANTY: &str = "🛡️ **Garanties & Retours :**

• Panneaux : 3 ans
• Batteries Xtorm : 2 ans
• Batterie La Française : 3 ans
• Retours gratuits sous 30 jours

Support client réactif ! 😊";

const BATTERIES: &str = "🔋 **Nos Batteries :**

• **Xtorm Rugged 20K** (54,89€) - IP65, anti-choc, outdoor, 20.000 mAh
• **La Française 10K** (17,29€) - Made in France, ultra-léger, 10.000 mAh

Quel usage prévoyez-vous ? Je peux vous conseiller !";

const KITS: &str = "⚡ **Nos Kits Solaires :**

**Kit ESSENTIEL (53,78€) :**
• 10.000 mAh, 410g
• Idéal : randonnées journée, études
• Made in France

**Kit EXPEDITION (86,35€) :**
• 20.000 mAh, 740g, IP65
• Idéal : treks multi-jours, conditions extrêmes

Les deux incluent panneau 10W + batterie + accessoires.

Quel type d'aventure ? 🏔️";

const COMPARISON: &str = "📊 **ESSENTIEL vs EXPEDITION :**

**ESSENTIEL (53,78€) :**
• 10K mAh, 410g
• Usage : journée, études, urbain
• Made in France

**EXPEDITION (86,35€) :**
• 20K mAh, 740g, IP65
• Usage : treks longs, conditions difficiles

**Recommandation :**
→ Journée/études : ESSENTIEL
→ Treks longs/extrêmes : EXPEDITION

Dites-moi votre usage pour un conseil précis !";

const GR20: &str = "🏔️ **Pour le GR20, je recommande le Kit EXPEDITION (86,35€) :**

• 20.000 mAh pour 15 jours d'autonomie
• IP65 : résistant à la pluie et aux chocs
• Charge rapide 35W
• Lampe torche intégrée

Parfait pour les conditions difficiles du GR20 ! ⚡";

const INSTALLATION: &str = "🔧 **Installation (30 secondes) :**

1. Fixez le panneau sur votre sac (mousquetons fournis)
2. Connectez le câble entre panneau et batterie
3. Le panneau charge la batterie au soleil
4. Connectez vos appareils à la batterie

**Astuce** : Laissez le panneau au soleil pendant la marche ! ☀️";

const EXPEDITION: &str = "🏔️ **Kit EXPEDITION (86,35€) :**

• 20.000 mAh, 740g
• IP65, anti-choc, lampe intégrée
• Charge rapide 35W
• Idéal : treks multi-jours, GR20, conditions extrêmes

Autonomie illimitée pour vos grandes aventures ! ⚡";

const ESSENTIEL: &str = "🎒 **Kit ESSENTIEL (53,78€) :**

• 10.000 mAh, 410g
• Made in France (Jura)
• Éco-conçu (recyclé)
• Idéal : randonnées journée, études, poids minimal

Léger, local, durable ! 🇫🇷";

const CONTACT: &str = "📧 **Nous contacter :**

• Page Contact du site
• Service client 7j/7
• Réponse rapide garantie

N'hésitez pas à nous écrire ! 😊";

const THANKS: &str = "De rien, c'est un plaisir ! 😊\n\nN'hésitez pas si vous avez d'autres questions. Bonne aventure avec SUNBAG ! ⚡";

const GOODBYE: &str = "À bientôt ! 👋\n\nRevenez quand vous voulez si vous avez des questions. Bonne journée ! ⚡";

/// Answer when no rule matches.
pub const DEFAULT_ANSWER: &str = "Je peux vous aider sur :\n\n• 💰 Prix et produits\n• 📦 Livraison\n• 🛡️ Garanties\n• 🔋 Batteries et kits\n• 🔧 Utilisation\n\nPosez-moi une question précise ! 😊";

/// Ordered rule table. Order matters: "expédition" hits delivery before the
/// kit rules ever see it.
const RULES: &[Rule] = &[
    Rule {
        trigger: Trigger::StartsWith(&[
            "bonjour",
            "salut",
            "hello",
            "bonsoir",
            "hey",
            "hi",
            "bon matin",
            "bon après-midi",
        ]),
        answer: GREETING,
    },
    Rule {
        trigger: Trigger::Contains(&["prix", "coût", "tarif", "combien", "cher"]),
        answer: PRICES,
    },
    Rule {
        trigger: Trigger::Contains(&[
            "livraison",
            "expédition",
            "shipping",
            "délai",
            "recevoir",
            "arrivée",
        ]),
        answer: DELIVERY,
    },
    Rule {
        trigger: Trigger::Contains(&[
            "garantie",
            "warranty",
            "retour",
            "remboursement",
            "défaut",
            "casse",
        ]),
        answer: WARRANTY,
    },
    Rule {
        trigger: Trigger::Contains(&["batterie", "power bank"]),
        answer: BATTERIES,
    },
    Rule {
        trigger: Trigger::Contains(&["kit", "solaire", "panneau", "autonomie"]),
        answer: KITS,
    },
    Rule {
        trigger: Trigger::Contains(&["différence", "comparer", "vs", "versus"]),
        answer: COMPARISON,
    },
    Rule {
        trigger: Trigger::Contains(&["gr20", "gr 20"]),
        answer: GR20,
    },
    Rule {
        trigger: Trigger::Contains(&[
            "installer",
            "installation",
            "comment",
            "utiliser",
            "fonctionne",
        ]),
        answer: INSTALLATION,
    },
    Rule {
        trigger: Trigger::Contains(&["expedition"]),
        answer: EXPEDITION,
    },
    Rule {
        trigger: Trigger::Contains(&["essentiel"]),
        answer: ESSENTIEL,
    },
    Rule {
        trigger: Trigger::Contains(&["contact", "email", "téléphone", "appeler", "joindre"]),
        answer: CONTACT,
    },
    Rule {
        trigger: Trigger::Contains(&["merci", "thanks", "parfait", "super", "génial"]),
        answer: THANKS,
    },
    Rule {
        trigger: Trigger::StartsWith(&[
            "au revoir",
            "bye",
            "à bientôt",
            "ciao",
            "goodbye",
            "à plus",
        ]),
        answer: GOODBYE,
    },
];

/// Pick the canned answer for `message`.
#[must_use]
pub fn reply(message: &str) -> &'static str {
    let normalized = message.to_lowercase();
    let normalized = normalized.trim();
    RULES
        .iter()
        .find(|rule| rule.trigger.fires(normalized))
        .map_or(DEFAULT_ANSWER, |rule| rule.answer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_greeting_only_as_prefix() {
        assert_eq!(reply("Bonjour, ça va ?"), GREETING);
        assert_eq!(reply("  HELLO"), GREETING);
        assert_ne!(reply("je dis bonjour"), GREETING);
    }

    #[test]
    fn test_rule_order() {
        // price beats kit
        assert_eq!(reply("Quel est le prix du kit ?"), PRICES);
        // "expédition" is a delivery word, checked before kits
        assert_eq!(reply("Le kit Expédition"), DELIVERY);
        // "kit" fires before the specific-kit rules
        assert_eq!(reply("kit essentiel"), KITS);
        assert_eq!(reply("essentiel"), ESSENTIEL);
        assert_eq!(reply("expedition"), EXPEDITION);
    }

    #[test]
    fn test_suggestions() {
        // "Quel kit pour le GR20 ?" contains "kit"
        assert_eq!(reply("Quel kit pour le GR20 ?"), KITS);
        assert_eq!(reply("Délai de livraison ?"), DELIVERY);
        // "panneau" is a kit word and comes first
        assert_eq!(reply("Comment installer le panneau ?"), KITS);
        assert_eq!(reply("Pour le GR20 ?"), GR20);
    }

    #[test]
    fn test_misc_rules() {
        assert_eq!(reply("Ma batterie"), BATTERIES);
        assert_eq!(reply("garantie ?"), WARRANTY);
        assert_eq!(reply("comment ça marche"), INSTALLATION);
        assert_eq!(reply("votre email"), CONTACT);
        assert_eq!(reply("merci beaucoup"), THANKS);
        assert_eq!(reply("Au revoir"), GOODBYE);
        assert_eq!(reply("quoi"), DEFAULT_ANSWER);
    }
}
