//! Blog posts bundled with the site.

use crate::i18n::Language;

/// Text with optional translations; English is always present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Localized<T> {
    pub en: T,
    pub hi: Option<T>,
    pub gu: Option<T>,
}

impl<T: Copy> Localized<T> {
    pub fn get(&self, language: Language) -> T {
        match language {
            Language::En => self.en,
            Language::Hi => self.hi.unwrap_or(self.en),
            Language::Gu => self.gu.unwrap_or(self.en),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlogPost {
    pub slug: &'static str,
    pub author: &'static str,
    pub date: &'static str,
    pub title: Localized<&'static str>,
    pub excerpt: Localized<&'static str>,
    /// Body paragraphs. A heading paragraph starts with `## `.
    pub body: Localized<&'static [&'static str]>,
}

/// A block of post body, ready to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Block {
    Heading(&'static str),
    Paragraph(&'static str),
}

impl BlogPost {
    pub fn blocks(&self, language: Language) -> Vec<Block> {
        self.body
            .get(language)
            .iter()
            .map(|&line| match line.strip_prefix("## ") {
                Some(heading) => Block::Heading(heading),
                None => Block::Paragraph(line),
            })
            .collect()
    }
}

pub fn posts() -> &'static [BlogPost] {
    POSTS
}

pub fn find(slug: &str) -> Option<&'static BlogPost> {
    POSTS.iter().find(|post| post.slug == slug)
}

static POSTS: &[BlogPost] = &[
    BlogPost {
        slug: "unlocking-credit-for-jewellers",
        author: "Aarav Sharma",
        date: "July 26, 2024",
        title: Localized {
            en: "Unlocking Credit: How Fintech is Solving the Jeweller's Oldest Problem",
            hi: Some("क्रेडिट अनलॉक करना: फिनटेक कैसे ज्वैलर की सबसे पुरानी समस्या का समाधान कर रहा है"),
            gu: Some("ક્રેડિટ અનલોકિંગ: ફિનટેક કેવી રીતે જ્વેલરની સૌથી જૂની સમસ્યાનું નિરાકરણ કરી રહ્યું છે"),
        },
        excerpt: Localized {
            en: "Access to timely and affordable credit is the lifeblood of any jewellery business. Fintech platforms like GEMBank are changing how jewellers borrow.",
            hi: Some("समय पर और किफायती क्रेडिट किसी भी आभूषण व्यवसाय की जीवनरेखा है। GEMBank जैसे फिनटेक प्लेटफ़ॉर्म ज्वैलर्स के उधार लेने का तरीका बदल रहे हैं।"),
            gu: Some("સમયસર અને પોસાય તેવી ક્રેડિટ કોઈપણ ઝવેરાત વ્યવસાયની જીવાદોરી છે. GEMBank જેવા ફિનટેક પ્લેટફોર્મ જ્વેલર્સની ઉધાર લેવાની રીત બદલી રહ્યા છે."),
        },
        body: Localized {
            en: &[
                "Access to timely and affordable credit is the lifeblood of any jewellery business. For generations, jewellers have relied on informal lending networks and rigid banking systems that do not understand their inventory-heavy business model.",
                "## The challenge with traditional lending",
                "Banks struggle to value gold and diamond inventory accurately. Applications are slow and paper-heavy, which leads to high interest rates, rigid repayment terms and long waits for working capital before the festive season.",
                "## A data-driven approach",
                "By looking at real sales, stock movement and hallmarking records, a lender can assess a jeweller's business in days rather than weeks, and offer credit lines that flex with the seasons of the trade.",
            ],
            hi: Some(&[
                "समय पर और किफायती क्रेडिट किसी भी आभूषण व्यवसाय की जीवनरेखा है। पीढ़ियों से ज्वैलर्स अनौपचारिक उधार और ऐसी बैंकिंग पर निर्भर रहे हैं जो उनके इन्वेंट्री-प्रधान व्यवसाय को नहीं समझती।",
                "## पारंपरिक ऋण की चुनौती",
                "बैंकों के लिए सोने और हीरे की इन्वेंट्री का सही मूल्यांकन कठिन है। आवेदन धीमे और कागज़ी होते हैं, जिससे ऊँची ब्याज दरें और त्योहारों से पहले पूंजी के लिए लंबा इंतज़ार होता है।",
                "## डेटा-आधारित तरीका",
                "वास्तविक बिक्री, स्टॉक और हॉलमार्किंग रिकॉर्ड देखकर ऋणदाता कुछ ही दिनों में व्यवसाय का आकलन कर सकता है और व्यापार के मौसम के साथ बदलने वाली क्रेडिट लाइन दे सकता है।",
            ]),
            gu: None,
        },
    },
    BlogPost {
        slug: "demystifying-compliance-automation",
        author: "Priya Mehta",
        date: "July 22, 2024",
        title: Localized {
            en: "Demystifying Compliance: Automating GST and Hallmarking for Jewellers",
            hi: Some("अनुपालन को आसान बनाना: ज्वैलर्स के लिए GST और हॉलमार्किंग का स्वचालन"),
            gu: None,
        },
        excerpt: Localized {
            en: "GST filings, HUID hallmarking and KYC checks eat into time that should go to customers. Here is how automation takes that load off.",
            hi: Some("GST फाइलिंग, HUID हॉलमार्किंग और KYC जाँच वह समय ले लेती हैं जो ग्राहकों को मिलना चाहिए। स्वचालन यह बोझ कैसे हटाता है, जानिए।"),
            gu: None,
        },
        body: Localized {
            en: &[
                "Compliance is a fact of life for every jeweller in India. GST filings, HUID hallmarking and KYC checks for high-value sales all take time away from customers.",
                "## Where the hours go",
                "Most of the effort is reconciliation: matching invoices to payments, hallmark numbers to stock and customer records to transactions, usually across several spreadsheets.",
                "## Letting the system keep the records",
                "When invoices, payments and inventory live on one platform, the records line up on their own. Returns can be prepared from data that is already correct, and audits stop being a scramble.",
            ],
            hi: None,
            gu: None,
        },
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugs_are_unique_and_findable() {
        for post in posts() {
            assert_eq!(find(post.slug), Some(post));
        }
        assert_eq!(find("no-such-post"), None);
    }

    #[test]
    fn missing_translations_fall_back_to_english() {
        let post = find("demystifying-compliance-automation").unwrap();
        assert_eq!(post.title.get(Language::Gu), post.title.en);
        assert!(post.title.get(Language::Hi).starts_with("अनुपालन"));
        assert_eq!(post.blocks(Language::Hi), post.blocks(Language::En));
    }

    #[test]
    fn headings_are_split_out() {
        let post = find("unlocking-credit-for-jewellers").unwrap();
        let blocks = post.blocks(Language::En);
        assert_eq!(blocks[1], Block::Heading("The challenge with traditional lending"));
        assert!(matches!(blocks[0], Block::Paragraph(_)));
    }
}
