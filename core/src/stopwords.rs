use lazy_static::lazy_static;
use std::collections::HashSet;

/// Bumped whenever the word lists below change, since it changes every index built from them.
pub const STOPWORDS_VERSION: u32 = 1;

/// English function words. Contractions are listed with the apostrophe removed
/// because matching happens after punctuation stripping.
pub const ENGLISH: &[&str] = &[
    "i","me","my","myself","we","our","ours","ourselves","you","youre","youve","youll","youd","your","yours","yourself","yourselves",
    "he","him","his","himself","she","shes","her","hers","herself","it","its","itself","they","them","their","theirs","themselves",
    "what","which","who","whom","this","that","thatll","these","those",
    "am","is","are","was","were","be","been","being","have","has","had","having","do","does","did","doing",
    "a","an","the","and","but","if","or","because","as","until","while","of","at","by","for","with","about","against","between",
    "into","through","during","before","after","above","below","to","from","up","down","in","out","on","off","over","under",
    "again","further","then","once","here","there","when","where","why","how","all","any","both","each","few","more","most",
    "other","some","such","no","nor","not","only","own","same","so","than","too","very","s","t","can","will","just",
    "don","dont","should","shouldve","now","d","ll","m","o","re","ve","y","ain","aren","arent","couldn","couldnt",
    "didn","didnt","doesn","doesnt","hadn","hadnt","hasn","hasnt","haven","havent","isn","isnt","ma","mightn","mightnt",
    "mustn","mustnt","needn","neednt","shan","shant","shouldn","shouldnt","wasn","wasnt","weren","werent","won","wont",
    "wouldn","wouldnt",
];

/// French function words, including the conjugations of "être" and "avoir".
pub const FRENCH: &[&str] = &[
    "au","aux","avec","ce","ces","dans","de","des","du","elle","en","et","eux","il","ils","je","la","le","les","leur","lui",
    "ma","mais","me","même","mes","moi","mon","ne","nos","notre","nous","on","ou","par","pas","pour","qu","que","qui","sa",
    "se","ses","son","sur","ta","te","tes","toi","ton","tu","un","une","vos","votre","vous","c","d","j","l","à","m","n","s",
    "t","y","été","étée","étées","étés","étant","étante","étants","étantes","suis","es","est","sommes","êtes","sont","serai",
    "seras","sera","serons","serez","seront","serais","serait","serions","seriez","seraient","étais","était","étions","étiez",
    "étaient","fus","fut","fûmes","fûtes","furent","sois","soit","soyons","soyez","soient","fusse","fusses","fût","fussions",
    "fussiez","fussent","ayant","ayante","ayantes","ayants","eu","eue","eues","eus","ai","as","avons","avez","ont","aurai",
    "auras","aura","aurons","aurez","auront","aurais","aurait","aurions","auriez","auraient","avais","avait","avions","aviez",
    "avaient","eut","eûmes","eûtes","eurent","aie","aies","ait","ayons","ayez","aient","eusse","eusses","eût","eussions",
    "eussiez","eussent",
    // not in the classic list but frequent enough in uploaded notes to drown real terms
    "cette","plus","moins","tous","tout","toute","toutes","autre","autres","aussi","fait",
];

lazy_static! {
    static ref STOPWORDS: HashSet<&'static str> = ENGLISH.iter().chain(FRENCH.iter()).copied().collect();
}

/// Exact-match lookup; callers pass already lowercased tokens.
pub fn is_stopword(token: &str) -> bool {
    STOPWORDS.contains(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn covers_both_languages() {
        assert!(is_stopword("the"));
        assert!(is_stopword("dont"));
        assert!(is_stopword("les"));
        assert!(is_stopword("été"));
        assert!(!is_stopword("chat"));
        assert!(!is_stopword("cat"));
    }

    #[test]
    fn lookup_is_case_sensitive() {
        assert!(!is_stopword("The"));
    }

    #[test]
    fn lists_overlap_on_shared_words() {
        assert!(ENGLISH.contains(&"on") && FRENCH.contains(&"on"));
        assert!(is_stopword("on"));
    }
}
