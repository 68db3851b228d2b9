//! Compiled-in legal knowledge corpus
//!
//! A small, immutable set of passages covering the three supported legal
//! domains. Loaded once into the semantic index at startup; the whole set
//! fits in memory and never changes at runtime. Changing the corpus means
//! rebuilding the index, not patching it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Legal domain a query or passage belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Topic {
    #[serde(rename = "RTI")]
    Rti,
    #[serde(rename = "Domestic Violence")]
    DomesticViolence,
    #[serde(rename = "Divorce")]
    Divorce,
}

impl Topic {
    /// All supported topics, in registry order
    pub const ALL: [Topic; 3] = [Topic::Rti, Topic::DomesticViolence, Topic::Divorce];

    /// Human-readable label, matching the serialized form
    pub fn label(&self) -> &'static str {
        match self {
            Topic::Rti => "RTI",
            Topic::DomesticViolence => "Domestic Violence",
            Topic::Divorce => "Divorce",
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single reference passage with provenance metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeChunk {
    /// Unique identifier
    pub id: String,

    /// Legal domain
    pub topic: Topic,

    /// Human-readable section label
    pub section: String,

    /// Passage body
    pub text: String,
}

impl KnowledgeChunk {
    pub fn new(
        id: impl Into<String>,
        topic: Topic,
        section: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            topic,
            section: section.into(),
            text: text.into(),
        }
    }
}

/// The compiled-in corpus: RTI Act 2005, PWDVA 2005, and divorce law.
pub fn legal_corpus() -> Vec<KnowledgeChunk> {
    vec![
        // -- RTI Act, 2005 ---------------------------------------------------
        KnowledgeChunk::new(
            "rti_scope_definition",
            Topic::Rti,
            "Scope and Definitions",
            "RTI Act 2005 - Scope and Who Can File: Section 2(f) defines 'Information' as any \
             material in any form - records, documents, memos, emails, opinions, advices, press \
             releases, circulars, orders, logbooks, contracts, reports, samples, models, and \
             electronic data. Section 2(h) defines 'Public Authority' as any body established by \
             the Constitution, Parliament, State Legislature, or Government notification - includes \
             all central/state departments, PSUs, government-aided institutions, banks, courts. \
             Section 2(j): Every citizen of India has the right to inspect records, obtain \
             certified copies, and take certified samples of material held by public authorities. \
             RTI does NOT apply to intelligence agencies listed in the Second Schedule except on \
             matters of corruption or human rights violations (Section 24).",
        ),
        KnowledgeChunk::new(
            "rti_filing_procedure",
            Topic::Rti,
            "Filing Procedure",
            "RTI Act 2005 - How to File an RTI Application (Section 6): Write a plain application \
             in English, Hindi, or any official language of the area. Address it to the Public \
             Information Officer (PIO) of the relevant department. NO reasons or justification \
             required - Section 6(1) explicitly states this. Pay a fee of Rs. 10 by Indian Postal \
             Order, Demand Draft, court fee stamp, or cash. BPL (Below Poverty Line) card holders \
             are FULLY EXEMPT from all fees - attach a BPL card copy. File ONLINE at \
             rtionline.gov.in for all central government departments, or by speed post, registered \
             post, or in person at the department office. Section 6(3): If the PIO of the wrong \
             department receives your application, they MUST transfer it to the correct public \
             authority within 5 days and inform you.",
        ),
        KnowledgeChunk::new(
            "rti_timelines_deadlines",
            Topic::Rti,
            "Timelines and Deadlines",
            "RTI Act 2005 - Timelines and Deadlines: Section 7(1): The PIO must provide \
             information within 30 days of receiving the application. Section 7(1) Proviso: If \
             information concerns the life or liberty of a person, the PIO must respond within 48 \
             HOURS; courts have read 'life and liberty' broadly to include ration cards, MGNREGA \
             wages, pension disbursement, and police safety. Section 7(2): Information pertaining \
             to a third party gives the PIO 40 days. Section 7(5): If the PIO misses the 30-day \
             deadline, information must be provided FREE OF COST. Section 7(6): Partial disclosure \
             - the PIO can supply part of the information and deny the rest with reasons. Deemed \
             Refusal: no response within 30 days is treated as a refusal and the applicant can \
             immediately file a First Appeal.",
        ),
        KnowledgeChunk::new(
            "rti_fees_charges",
            Topic::Rti,
            "Fees and Charges",
            "RTI Act 2005 - Detailed Fee Structure: Application fee: Rs. 10 (IPO, DD, court fee \
             stamp, or cash). BPL applicants: ZERO fee for application AND information - attach a \
             BPL card copy. Information fee: Rs. 2 per page (A4 or A3 size), Rs. 5 per page for \
             larger formats, Rs. 50 per diskette, actual cost for samples or models. Inspection of \
             records: Rs. 5 per hour, first hour free. First Appeal: FREE. Second Appeal to \
             CIC/SIC: FREE. If the PIO misses the 30-day deadline under Section 7(5), ALL \
             information is provided free of cost. State governments set their own fee schedules, \
             so amounts vary by state.",
        ),
        KnowledgeChunk::new(
            "rti_appeals_process",
            Topic::Rti,
            "Appeals - First and Second",
            "RTI Act 2005 - Appeals Process: Section 19(1) - First Appeal: File with the First \
             Appellate Authority (an officer senior to the PIO in the same department) within 30 \
             days of an unsatisfactory reply, or within 60 days of filing if there was no reply. \
             The First Appeal is FREE and must be decided within 30 days, extendable to 45. \
             Section 19(3) - Second Appeal: If the First Appeal fails or gets no response, file \
             with the Central Information Commission (CIC) for central government or the State \
             Information Commission (SIC) for state government, within 90 days of the First \
             Appellate Authority's order. FREE. Section 19(8): the CIC/SIC can require disclosure, \
             appoint a new PIO, order publication, or compensate the complainant. Section 20 - \
             Penalty: the CIC/SIC can impose Rs. 250 per day of delay on the PIO, up to Rs. \
             25,000, and recommend disciplinary action.",
        ),
        KnowledgeChunk::new(
            "rti_exemptions",
            Topic::Rti,
            "Exemptions from Disclosure",
            "RTI Act 2005 - What Information Can Be Withheld (Section 8): Section 8(1)(a): \
             national security, sovereignty, strategic or scientific interest. Section 8(1)(b): \
             information forbidden from publication by courts. Section 8(1)(c): parliamentary \
             privilege. Section 8(1)(d): commercial confidence, trade secrets, intellectual \
             property. Section 8(1)(e): information held in a fiduciary relationship. Section \
             8(1)(g): information that would endanger a person's life. Section 8(1)(h): \
             information that would impede an ongoing investigation or prosecution. Section \
             8(1)(j): personal information with no public interest - frequently misused; the CIC \
             has held that salary, assets, and conduct of public servants IS disclosable. Section \
             8(2): even exempt information must be disclosed when there is overriding public \
             interest. Section 11: the PIO must give a third party 5 days notice before disclosing \
             information that concerns it.",
        ),
        // -- Protection of Women from Domestic Violence Act, 2005 ------------
        KnowledgeChunk::new(
            "dv_definition_types",
            Topic::DomesticViolence,
            "Definition and Types of Abuse",
            "Protection of Women from Domestic Violence Act 2005 (PWDVA) - What Counts as \
             Domestic Violence: Section 3 defines domestic violence to include Physical Abuse \
             (any act causing bodily pain, harm, or danger to life - hitting, slapping, kicking, \
             pushing, burning, use of weapons), Sexual Abuse (any conduct of a sexual nature that \
             humiliates, degrades, or violates dignity), Verbal and Emotional Abuse (insults, \
             ridicule, humiliation, threats of physical harm, threats to take away children, \
             controlling behaviour, isolation from family), and Economic Abuse under Section \
             3(iv) (depriving the woman of financial resources she is entitled to, refusing to \
             pay rent, forcing her out of the shared household, disposing of stridhan or \
             property). Section 3(iv)(c): repeated dowry demands constitute domestic violence, \
             separate from the Dowry Prohibition Act 1961.",
        ),
        KnowledgeChunk::new(
            "dv_who_can_file_officials",
            Topic::DomesticViolence,
            "Who Can File and Key Officials",
            "PWDVA 2005 - Who Can File and Key Officials: Section 2(a) - Aggrieved Person: any \
             woman who is or has been in a domestic relationship and alleges domestic violence; \
             includes wife, live-in partner, sister, mother, daughter. Section 2(q) - Respondent: \
             adult male member of the household or relatives of the husband or partner. Who can \
             approach: the woman herself, any person on her behalf, her child, a Protection \
             Officer, or a police officer. Protection Officer (Section 9): appointed by the State \
             Government, service is FREE; duties include preparing the DIR, assisting in court, \
             arranging shelter and medical aid. Service Provider (Section 10): registered NGOs can \
             receive complaints and provide shelter and legal aid. Magistrate (Section 12): any \
             Judicial or Metropolitan Magistrate has jurisdiction, and the aggrieved woman can \
             file directly, bypassing the Protection Officer.",
        ),
        KnowledgeChunk::new(
            "dv_dir_filing",
            Topic::DomesticViolence,
            "Domestic Incident Report Filing",
            "PWDVA 2005 - Filing the Domestic Incident Report (DIR) and Approaching the \
             Magistrate: Step 1: contact the Protection Officer at the district court, police \
             station, or District Legal Services Authority - FREE. Step 2: the Protection Officer \
             is legally obligated under Section 9(b) to prepare the DIR in Form I; a Service \
             Provider can also prepare it under Section 10(2)(c). Step 3: the Protection Officer \
             files the DIR with the Magistrate under Section 12, or you can file an application \
             under Section 12(1) yourself. Section 12(4): the Magistrate MUST fix the first \
             hearing within 3 DAYS of receiving the application. Section 12(5): proceedings must \
             be disposed of within 60 DAYS. Section 16: proceedings are held in camera to protect \
             dignity. EMERGENCY: call Women Helpline 181 (24x7) or Police 100; police MUST assist \
             under Section 5.",
        ),
        KnowledgeChunk::new(
            "dv_court_orders",
            Topic::DomesticViolence,
            "Court Orders Available",
            "PWDVA 2005 - Orders the Magistrate Can Pass: Protection Order (Section 18): \
             prohibits the respondent from committing domestic violence, entering the victim's \
             workplace or school, contacting the victim, or alienating her assets or stridhan; \
             violating it is a CRIMINAL OFFENCE under Section 31, punishable with up to 1 year \
             imprisonment or a fine up to Rs. 20,000 or both. Residence Order (Section 19): the \
             respondent must vacate the shared household; the victim cannot be dispossessed even \
             without ownership, and alternative accommodation of the same standard must be \
             provided. Monetary Relief (Section 20): loss of earnings, medical expenses, \
             maintenance for the woman and children, rent. Custody Order (Section 21): interim \
             custody of children to the aggrieved person. Compensation (Section 22): lump-sum \
             damages for injuries, emotional distress, and mental torture.",
        ),
        KnowledgeChunk::new(
            "dv_criminal_remedies",
            Topic::DomesticViolence,
            "Criminal Law Remedies",
            "Parallel Criminal Remedies for Domestic Violence Victims: Section 498A IPC (now \
             Section 85 BNS 2023): cruelty by husband or relatives; cognizable, non-bailable, up \
             to 3 years imprisonment plus fine. Section 304B IPC (now Section 80 BNS): dowry \
             death within 7 years of marriage in suspicious circumstances; minimum 7 years, \
             maximum life, with a presumption against the husband. Sections 323/325 IPC (now \
             115/117 BNS): simple or grievous hurt, 1 to 7 years. Section 354 IPC (now Section 74 \
             BNS): assault or criminal force to outrage modesty. Section 506 IPC (now Section 351 \
             BNS): criminal intimidation. Dowry Prohibition Act 1961, Section 4: demanding dowry \
             is punishable by a minimum of 6 months imprisonment and a fine of at least Rs. \
             5,000. HELPLINES: National Women Helpline 181 (free, 24x7), Police 100, National \
             Commission for Women 011-26942369, District Legal Services Authority for free legal \
             aid.",
        ),
        // -- Hindu Marriage Act, 1955 - Divorce -------------------------------
        KnowledgeChunk::new(
            "divorce_eligibility_types",
            Topic::Divorce,
            "Eligibility and Types of Divorce",
            "Hindu Marriage Act 1955 - Divorce: Types and Eligibility: Mutual Consent Divorce - \
             Section 13B: both spouses agree and must have lived separately for AT LEAST 1 YEAR; \
             both appear before the Family Court; faster and less adversarial. Contested Divorce \
             - Section 13: grounds include cruelty (Section 13(1)(ia)), adultery (Section \
             13(1)(i)), desertion for 2+ years (Section 13(1)(ib)), conversion to another \
             religion, mental disorder, venereal disease, renunciation, and presumption of death. \
             Special Marriage Act 1954, Section 28: mutual consent divorce for inter-religious \
             marriages, also requiring 1 year of separation. Muslim Personal Law: Talaq-e-Ahsan \
             and Khula (wife-initiated); instant triple talaq is ABOLISHED by the Muslim Women \
             (Protection of Rights on Marriage) Act 2019. Christian divorce: Indian Divorce Act \
             1869, Section 10A - mutual consent with a 2-year separation requirement.",
        ),
        KnowledgeChunk::new(
            "divorce_procedure_steps",
            Topic::Divorce,
            "Step-by-Step Mutual Consent Procedure",
            "Section 13B, Hindu Marriage Act 1955 - Mutual Consent Divorce Procedure: \
             Pre-requisites: both must agree and have lived separately for 1 year or more \
             immediately before filing. Step 1 - Settlement: both parties settle alimony, child \
             custody and visitation, return of stridhan, and division of property in a Memorandum \
             of Understanding; courts insist on a complete settlement. Step 2 - Engage an \
             advocate and draft a joint petition signed by BOTH spouses. Step 3 - File in the \
             Family Court where the marriage was solemnized, where the respondent resides, or \
             where the parties last lived together; court fee approximately Rs. 200-500. Step 4 - \
             First Motion (Section 13B(1)): both appear, statements recorded on oath, and a \
             6-month cooling-off period begins. Step 5 - Second Motion (Section 13B(2)): filed \
             within 18 months of the First Motion; both confirm consent and the decree is passed. \
             Cooling-off waiver: Amardeep Singh v. Harveen Kaur (SC 2017) allows waiving the 6 \
             months when the marriage is irretrievably broken and all issues are settled.",
        ),
        KnowledgeChunk::new(
            "divorce_alimony_maintenance",
            Topic::Divorce,
            "Alimony and Maintenance",
            "Alimony and Maintenance Laws in India - Divorce Context: Section 24, Hindu Marriage \
             Act 1955: maintenance pendente lite DURING proceedings for whichever spouse earns \
             less; either husband or wife can claim; ordered within 60 days. Section 25, HMA \
             1955: permanent alimony - lump sum or monthly, awarded AFTER the decree, considering \
             income and property of both parties and their conduct; revisable if circumstances \
             change. Section 125 CrPC (now Section 144 BNSS 2023): a Magistrate can order monthly \
             maintenance for wife, children, and parents, and this can be obtained quickly, even \
             before a Family Court divorce; women can file under BOTH Section 125 CrPC and the \
             HMA simultaneously. Stridhan: all jewellery, gifts, and property given to the wife \
             at, before, or after marriage is her absolute property - Pratibha Rani v. Suraj \
             Kumar (SC 1985); the husband has NO right to stridhan even during the marriage.",
        ),
        KnowledgeChunk::new(
            "divorce_child_custody",
            Topic::Divorce,
            "Child Custody",
            "Child Custody Laws in India - Divorce Context: Section 26, Hindu Marriage Act 1955: \
             the court can pass interim or permanent custody orders at any stage, even before the \
             decree; the best interest of the child is paramount. Guardians and Wards Act 1890: \
             the applicable law for custody disputes; Section 13 puts the welfare of the minor \
             first. General practice: the mother usually gets custody of children below 5 years \
             (tender years doctrine); for older children the court weighs the child's preference, \
             stability of home, financial capacity, and sibling relationships. The father retains \
             visitation rights when the mother has custody. NRI custody: if one parent takes a \
             child abroad without consent, the other can file a Habeas Corpus petition in the \
             High Court; India is not a Hague Convention signatory. Interim custody can be \
             obtained within days of filing. Section 21, PWDVA 2005: a Magistrate can grant \
             temporary custody in domestic violence cases as well.",
        ),
        KnowledgeChunk::new(
            "divorce_nri_special",
            Topic::Divorce,
            "NRI Divorce and Other Special Situations",
            "Special Divorce Situations - NRI, Muslim, Christian: NRI divorce under the Hindu \
             Marriage Act: Section 19 - the petition can be filed in India even if one party is \
             abroad; the spouse abroad can appoint a Power of Attorney holder for proceedings but \
             MUST appear in person for the final hearing. Foreign divorce decrees are not \
             automatically valid in India and must be enforced through Indian courts. Muslim \
             divorce: instant triple talaq is a CRIMINAL OFFENCE under the Muslim Women \
             (Protection of Rights on Marriage) Act 2019, with up to 3 years imprisonment. \
             Dissolution of Muslim Marriages Act 1939: the wife can seek divorce for unknown \
             whereabouts, failure to maintain, imprisonment, cruelty, impotency, or mental \
             disorder. Khula: wife-initiated divorce, typically returning the mehr received at \
             nikah. Christian divorce: Indian Divorce Act 1869 as amended, Section 10A - mutual \
             consent requires 2 years of separation.",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_chunk_ids_unique() {
        let corpus = legal_corpus();
        let ids: HashSet<_> = corpus.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids.len(), corpus.len());
    }

    #[test]
    fn test_every_topic_covered() {
        let corpus = legal_corpus();
        for topic in Topic::ALL {
            assert!(
                corpus.iter().any(|c| c.topic == topic),
                "no corpus chunk for {}",
                topic
            );
        }
    }

    #[test]
    fn test_filing_chunk_cites_section_6() {
        let corpus = legal_corpus();
        let filing = corpus
            .iter()
            .find(|c| c.id == "rti_filing_procedure")
            .expect("filing chunk present");
        assert!(filing.text.contains("Section 6(1)"));
    }

    #[test]
    fn test_topic_labels() {
        assert_eq!(Topic::Rti.label(), "RTI");
        assert_eq!(Topic::DomesticViolence.label(), "Domestic Violence");
        assert_eq!(Topic::Divorce.label(), "Divorce");
        assert_eq!(
            serde_json::to_string(&Topic::DomesticViolence).unwrap(),
            "\"Domestic Violence\""
        );
    }
}
