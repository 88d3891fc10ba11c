//! Static product fixtures.

use shopshifter_core::{FeaturedProduct, Price};

/// The products highlighted on the home page.
#[must_use]
pub fn featured_products() -> [FeaturedProduct; 4] {
    [
        FeaturedProduct {
            serial_number: 1,
            name: "White Watch",
            image: "/products/product1.jpg",
            alt: "A Beautiful White Watch",
            price: Price::from_cents(1999),
        },
        FeaturedProduct {
            serial_number: 2,
            name: "Black Headphones",
            image: "/products/product2.jpg",
            alt: "A Beautiful Black Headphones",
            price: Price::from_cents(3199),
        },
        FeaturedProduct {
            serial_number: 3,
            name: "White Camera",
            image: "/products/product3.jpg",
            alt: "A Beautiful White Camera",
            price: Price::from_cents(4999),
        },
        FeaturedProduct {
            serial_number: 4,
            name: "White Airpods",
            image: "/products/product4.jpg",
            alt: "A Beautiful White Airpods",
            price: Price::from_cents(7499),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serial_numbers_are_sequential() {
        let serials: Vec<u32> = featured_products().iter().map(|p| p.serial_number).collect();
        assert_eq!(serials, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_prices() {
        let prices: Vec<String> = featured_products()
            .iter()
            .map(|p| p.price.display())
            .collect();
        assert_eq!(prices, vec!["$19.99", "$31.99", "$49.99", "$74.99"]);
    }
}
