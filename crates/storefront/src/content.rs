//! Static copy for the home, about, and FAQ pages.
//!
//! Text is compiled in; there is no content directory to load at startup.

/// A question and its answer on the FAQ page.
#[derive(Debug, Clone, Copy)]
pub struct FaqItem {
    pub id: u32,
    pub question: &'static str,
    /// Paragraphs, rendered in order.
    pub answer: &'static [&'static str],
}

/// A titled group of FAQ items.
#[derive(Debug, Clone, Copy)]
pub struct FaqSection {
    pub slug: &'static str,
    pub title: &'static str,
    pub items: &'static [FaqItem],
}

/// A customer quote on the home page.
#[derive(Debug, Clone, Copy)]
pub struct Testimonial {
    pub name: &'static str,
    pub role: &'static str,
    pub content: &'static str,
    pub rating: u8,
}

impl Testimonial {
    #[must_use]
    pub fn stars(&self) -> String {
        "\u{2605}".repeat(usize::from(self.rating))
    }
}

/// A titled blurb, used for "why choose us", values, and team cards.
#[derive(Debug, Clone, Copy)]
pub struct Blurb {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub text: &'static str,
}

const fn blurb(title: &'static str, text: &'static str) -> Blurb {
    Blurb {
        title,
        subtitle: "",
        text,
    }
}

pub const WHY_CHOOSE_US: [Blurb; 3] = [
    blurb(
        "Quality Service",
        "We ensure that our services meet the highest standards of quality.",
    ),
    blurb(
        "Expert Team",
        "Our team consists of experts in their respective fields, ensuring you get the best service possible.",
    ),
    blurb(
        "Customer Satisfaction",
        "We prioritize customer satisfaction and strive to exceed your expectations.",
    ),
];

pub const TESTIMONIALS: [Testimonial; 3] = [
    Testimonial {
        name: "Sarah Johnson",
        role: "Loyal Customer",
        content: "Best online shopping experience ever! The products are high quality and delivery is super fast!",
        rating: 5,
    },
    Testimonial {
        name: "John Smith",
        role: "Verified Buyer",
        content: "I'm very satisfied with the services provided. Highly recommend!",
        rating: 5,
    },
    Testimonial {
        name: "Emma Davis",
        role: "New Customer",
        content: "The products are exactly as pictured, and customer service is outstanding.",
        rating: 4,
    },
];

pub const ABOUT_MISSION: &str = "At Botanical Store, we believe that plants have the power to \
    transform spaces and uplift spirits. Our mission is to make the joy of plant ownership \
    accessible to everyone, from seasoned gardeners to first-time plant parents.";

pub const ABOUT_PILLARS: [Blurb; 2] = [
    blurb(
        "Quality Plants",
        "We source only the healthiest and most vibrant plants from trusted growers.",
    ),
    blurb(
        "Expert Care",
        "Our team of plant experts is here to help you succeed in your plant journey.",
    ),
];

pub const TEAM: [Blurb; 3] = [
    Blurb {
        title: "Sarah Green",
        subtitle: "Plant Expert",
        text: "Passionate about helping others discover the joy of plant care.",
    },
    Blurb {
        title: "Michael Bloom",
        subtitle: "Horticulturist",
        text: "Expert in plant care and sustainable gardening practices.",
    },
    Blurb {
        title: "Emma Rose",
        subtitle: "Customer Care",
        text: "Dedicated to providing exceptional service to our customers.",
    },
];

pub const VALUES: [Blurb; 3] = [
    blurb(
        "Passion",
        "We're passionate about plants and sharing that passion with our community.",
    ),
    blurb(
        "Sustainability",
        "We're committed to sustainable practices in everything we do.",
    ),
    blurb(
        "Innovation",
        "We're always looking for new ways to enhance your plant shopping experience.",
    ),
];

pub const FAQ: [FaqSection; 5] = [
    FaqSection {
        slug: "plant-care",
        title: "Plant Care",
        items: &[
            FaqItem {
                id: 1,
                question: "How often should I water my plants?",
                answer: &[
                    "Watering frequency depends on the type of plant, the season, the pot size and material, and indoor conditions like humidity and temperature.",
                    "As a general rule, check the soil moisture with your finger. If the top 1-2 inches feel dry, it's usually time to water. It's better to underwater than overwater, as overwatering is the most common cause of plant death.",
                ],
            },
            FaqItem {
                id: 2,
                question: "How much light do indoor plants need?",
                answer: &[
                    "Different plants have different light requirements. Plants labeled as 'low light' can survive in areas with minimal natural light, though they might grow slowly. Medium-light plants need bright, indirect light, while high-light plants require several hours of direct sunlight daily.",
                ],
            },
            FaqItem {
                id: 3,
                question: "Should I fertilize my indoor plants?",
                answer: &[
                    "Yes. Use a balanced liquid fertilizer during the growing season (spring and summer) according to package instructions, and reduce or stop fertilizing in fall and winter when growth naturally slows.",
                ],
            },
            FaqItem {
                id: 4,
                question: "How do I know if my plant is healthy?",
                answer: &[
                    "A healthy plant typically has vibrant foliage, sturdy stems, and new growth. Signs of problems include yellowing leaves, brown spots, wilting despite adequate water, stunted growth, or visible pests.",
                ],
            },
            FaqItem {
                id: 15,
                question: "How do I repot my plant?",
                answer: &[
                    "Repot in spring or summer. Choose a pot 1-2 inches wider than the current one and water the plant a day or two before.",
                    "Loosen the root ball gently, set the plant in fresh potting mix leaving an inch of space at the top, then water thoroughly and keep it in indirect light for a few days.",
                ],
            },
        ],
    },
    FaqSection {
        slug: "shipping",
        title: "Shipping",
        items: &[
            FaqItem {
                id: 5,
                question: "How do you ship live plants?",
                answer: &[
                    "Each plant is secured in its pot with breathable material and placed in protective packaging. During extreme weather we may delay shipments or use heat packs and insulation.",
                ],
            },
            FaqItem {
                id: 6,
                question: "What are your shipping rates?",
                answer: &[
                    "Standard Shipping (5-7 business days) starts at $5.99 and Express Shipping (2-3 business days) at $12.99.",
                    "Standard shipping is free on orders over $75.",
                ],
            },
            FaqItem {
                id: 7,
                question: "How long will it take to receive my order?",
                answer: &[
                    "Orders are processed within 1-2 business days. You'll receive a tracking number by email once your order ships.",
                ],
            },
        ],
    },
    FaqSection {
        slug: "returns",
        title: "Returns",
        items: &[
            FaqItem {
                id: 8,
                question: "What is your return policy?",
                answer: &[
                    "If plants arrive damaged, contact us within 48 hours with photos. Non-plant items can be returned within 30 days in new, unused condition.",
                    "Refunds are issued to the original payment method within 5-7 business days after we receive the returned items.",
                ],
            },
            FaqItem {
                id: 9,
                question: "My plant arrived damaged. What should I do?",
                answer: &[
                    "Please contact customer service within 48 hours of delivery with photos of the plant and packaging. We'll arrange a replacement or refund.",
                ],
            },
            FaqItem {
                id: 10,
                question: "Can I exchange my plant for a different variety?",
                answer: &[
                    "We don't offer direct exchanges for plants, but we can arrange a return and refund within 7 days so you can order your preferred variety.",
                ],
            },
        ],
    },
    FaqSection {
        slug: "size-guide",
        title: "Size Guide",
        items: &[
            FaqItem {
                id: 11,
                question: "What do pot sizes mean?",
                answer: &[
                    "Small pots are 4-6 inches in diameter, medium pots 8-10 inches, and large pots 12 inches or more.",
                    "The listed plant height is measured from the base of the pot to the top of the plant.",
                ],
            },
            FaqItem {
                id: 12,
                question: "How big will my plant grow?",
                answer: &[
                    "Growth varies by species, care, and conditions. Product descriptions list the mature size under ideal conditions.",
                ],
            },
        ],
    },
    FaqSection {
        slug: "general",
        title: "General",
        items: &[
            FaqItem {
                id: 13,
                question: "Are your plants safe for pets?",
                answer: &[
                    "Many plants can be toxic to pets if ingested. We label pet-friendly plants in our product descriptions.",
                ],
            },
            FaqItem {
                id: 14,
                question: "Do you offer gift options?",
                answer: &[
                    "Yes! You can add a personalized gift message at checkout, and gift wrapping is available for an additional fee.",
                ],
            },
        ],
    },
];

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_faq_ids_are_unique() {
        let ids: Vec<u32> = FAQ
            .iter()
            .flat_map(|section| section.items.iter().map(|item| item.id))
            .collect();
        let unique: HashSet<_> = ids.iter().collect();
        assert_eq!(ids.len(), unique.len());
        assert_eq!(ids.len(), 15);
    }

    #[test]
    fn test_testimonial_stars() {
        let stars = TESTIMONIALS.last().map(Testimonial::stars);
        assert_eq!(stars.as_deref(), Some("\u{2605}\u{2605}\u{2605}\u{2605}"));
    }
}
